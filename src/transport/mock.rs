//! In-memory transport double for tests.
//!
//! `MockTransport` hands out `MockHandle`s that record every `emit` and let
//! tests fire lifecycle signals on demand. Callbacks run synchronously on
//! the firing thread, which keeps state transitions deterministic in tests.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::ListenerId;

use super::capability::{ConnectOptions, EventCallback, Transport, TransportHandle, signal};

// ============================================================================
// MockTransport
// ============================================================================

/// Transport double that records every handle it creates.
pub(crate) struct MockTransport {
    /// Handles in creation order, one per connect call.
    handles: Mutex<Vec<Arc<MockHandle>>>,

    /// Number of upcoming connect calls to fail.
    fail_connects: AtomicU32,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            handles: Mutex::new(Vec::new()),
            fail_connects: AtomicU32::new(0),
        })
    }

    /// Makes the next `count` connect calls return an error.
    pub(crate) fn fail_next_connects(&self, count: u32) {
        self.fail_connects.store(count, Ordering::SeqCst);
    }

    /// Returns the number of successful connect calls so far.
    pub(crate) fn connect_count(&self) -> usize {
        self.handles.lock().len()
    }

    /// Returns the most recently created handle.
    ///
    /// # Panics
    ///
    /// Panics if no connect call has succeeded yet.
    pub(crate) fn latest_handle(&self) -> Arc<MockHandle> {
        let handles = self.handles.lock();
        Arc::clone(handles.last().expect("no handle created yet"))
    }

    /// Returns the handle created by the Nth successful connect (0-based).
    pub(crate) fn handle(&self, index: usize) -> Arc<MockHandle> {
        Arc::clone(&self.handles.lock()[index])
    }
}

impl Transport for MockTransport {
    fn connect(&self, url: &Url, options: &ConnectOptions) -> Result<Arc<dyn TransportHandle>> {
        let remaining = self.fail_connects.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_connects.store(remaining - 1, Ordering::SeqCst);
            return Err(Error::connection("mock transport refused to connect"));
        }

        let handle = Arc::new(MockHandle::new(url.clone(), *options));
        self.handles.lock().push(Arc::clone(&handle));
        Ok(handle)
    }
}

// ============================================================================
// MockHandle
// ============================================================================

/// Handle double: records emits, dispatches fired events to listeners.
pub(crate) struct MockHandle {
    url: Url,
    options: ConnectOptions,
    connected: AtomicBool,
    listeners: Mutex<FxHashMap<String, Vec<(ListenerId, EventCallback)>>>,
    emitted: Mutex<Vec<(String, Value)>>,
}

impl MockHandle {
    fn new(url: Url, options: ConnectOptions) -> Self {
        Self {
            url,
            options,
            connected: AtomicBool::new(false),
            listeners: Mutex::new(FxHashMap::default()),
            emitted: Mutex::new(Vec::new()),
        }
    }

    /// Invokes every callback registered for `event`.
    ///
    /// Callbacks are cloned out of the lock first so they may re-enter the
    /// handle (or the manager) without deadlocking.
    pub(crate) fn fire(&self, event: &str, payload: Value) {
        let callbacks: Vec<EventCallback> = {
            let listeners = self.listeners.lock();
            listeners
                .get(event)
                .map(|entries| entries.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default()
        };

        for callback in callbacks {
            callback(payload.clone());
        }
    }

    /// Marks the channel connected and fires the `connected` signal.
    pub(crate) fn fire_connected(&self) {
        self.connected.store(true, Ordering::SeqCst);
        self.fire(signal::CONNECTED, Value::Null);
    }

    /// Marks the channel lost and fires the `disconnected` signal.
    pub(crate) fn fire_disconnected(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.fire(signal::DISCONNECTED, Value::Null);
    }

    /// Fires the `error` signal with the given payload.
    pub(crate) fn fire_error(&self, payload: Value) {
        self.fire(signal::ERROR, payload);
    }

    /// Returns every `(event, payload)` pair emitted so far, in order.
    pub(crate) fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().clone()
    }

    /// Returns the number of callbacks registered for `event`.
    pub(crate) fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .lock()
            .get(event)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn options(&self) -> ConnectOptions {
        self.options
    }
}

impl TransportHandle for MockHandle {
    fn emit(&self, event: &str, payload: Value) {
        self.emitted.lock().push((event.to_string(), payload));
    }

    fn on(&self, event: &str, callback: EventCallback) -> ListenerId {
        let id = ListenerId::next();
        self.listeners
            .lock()
            .entry(event.to_string())
            .or_default()
            .push((id, callback));
        id
    }

    fn off(&self, event: &str, listener: ListenerId) {
        let mut listeners = self.listeners.lock();
        if let Some(entries) = listeners.get_mut(event) {
            entries.retain(|(id, _)| *id != listener);
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn endpoint() -> Url {
        Url::parse("http://localhost:5000").expect("valid url")
    }

    #[test]
    fn test_connect_records_handle() {
        let transport = MockTransport::new();
        let handle = transport
            .connect(&endpoint(), &ConnectOptions::default())
            .expect("connect");

        assert_eq!(transport.connect_count(), 1);
        assert!(!handle.is_connected());
    }

    #[test]
    fn test_fail_next_connects() {
        let transport = MockTransport::new();
        transport.fail_next_connects(1);

        let first = transport.connect(&endpoint(), &ConnectOptions::default());
        assert!(first.is_err());

        let second = transport.connect(&endpoint(), &ConnectOptions::default());
        assert!(second.is_ok());
        assert_eq!(transport.connect_count(), 1);
    }

    #[test]
    fn test_fire_dispatches_to_listeners() {
        let transport = MockTransport::new();
        transport
            .connect(&endpoint(), &ConnectOptions::default())
            .expect("connect");
        let handle = transport.latest_handle();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        handle.on(
            "chat.message",
            Arc::new(move |payload| seen_clone.lock().push(payload)),
        );

        handle.fire("chat.message", json!({ "text": "hi" }));
        handle.fire("other", json!(1));

        assert_eq!(seen.lock().as_slice(), &[json!({ "text": "hi" })]);
    }

    #[test]
    fn test_off_removes_listener() {
        let transport = MockTransport::new();
        transport
            .connect(&endpoint(), &ConnectOptions::default())
            .expect("connect");
        let handle = transport.latest_handle();

        let id = handle.on("presence", Arc::new(|_| {}));
        assert_eq!(handle.listener_count("presence"), 1);

        handle.off("presence", id);
        assert_eq!(handle.listener_count("presence"), 0);
    }

    #[test]
    fn test_connected_flag_tracks_signals() {
        let transport = MockTransport::new();
        transport
            .connect(&endpoint(), &ConnectOptions::default())
            .expect("connect");
        let handle = transport.latest_handle();

        handle.fire_connected();
        assert!(handle.is_connected());

        handle.fire_disconnected();
        assert!(!handle.is_connected());
    }
}
