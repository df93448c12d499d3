//! Socket manager core.
//!
//! [`SocketManager`] owns the single live transport handle, the outbound
//! queue, and the reconnection policy. Application code calls
//! [`emit`](SocketManager::emit)/[`on`](SocketManager::on)/
//! [`off`](SocketManager::off) against it; the manager forwards to the
//! transport or queues/drops depending on connection state.
//!
//! # Failure contract
//!
//! Nothing here returns an error. Construction failures are logged and
//! swallowed, emits while disconnected are queued with a warning, listener
//! registrations without a handle are dropped with a warning, and an
//! exhausted retry budget is terminal and silent beyond a log line. Callers
//! observe connectivity through [`socket`](SocketManager::socket) and
//! [`state`](SocketManager::state).
//!
//! # Stale handles
//!
//! Every connect attempt bumps a generation counter, and lifecycle callbacks
//! carry the generation of the handle they were installed on. Signals from a
//! superseded handle are ignored, which makes reconnect scheduling idempotent
//! when disconnect/connect signals arrive in unexpected sequences.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ManagerConfig;
use crate::identifiers::ListenerId;
use crate::protocol::OutboundMessage;
use crate::transport::{EventCallback, Transport, TransportHandle, signal};

use super::policy::ReconnectPolicy;
use super::queue::OutboundQueue;
use super::state::{ConnectionState, SideEffect, Signal, transition};

// ============================================================================
// Types
// ============================================================================

/// Handle slot plus the state that must change atomically with it.
struct Link {
    /// Connectivity of the managed channel.
    state: ConnectionState,

    /// Current transport handle. Exactly one live reference at a time.
    handle: Option<Arc<dyn TransportHandle>>,

    /// Bumped on every connect attempt; guards against stale signals.
    generation: u64,
}

// ============================================================================
// SocketManager
// ============================================================================

/// Persistent connection manager for one bidirectional message channel.
///
/// # Example
///
/// ```ignore
/// use socket_manager::{ManagerConfig, SocketManager};
/// use serde_json::json;
///
/// let manager = SocketManager::new(ManagerConfig::from_env(), transport);
///
/// // Queued until connected, then flushed in order.
/// manager.emit("chat.message", json!({ "text": "hi" }));
/// ```
///
/// # Runtime
///
/// Reconnect timers are spawned on the ambient tokio runtime; the manager
/// must be driven from within one.
pub struct SocketManager {
    config: ManagerConfig,
    transport: Arc<dyn Transport>,
    link: Mutex<Link>,
    queue: Mutex<OutboundQueue>,
    policy: Mutex<ReconnectPolicy>,
}

// ============================================================================
// SocketManager - Constructor
// ============================================================================

impl SocketManager {
    /// Creates a manager and immediately initiates the first connection
    /// attempt.
    ///
    /// Never fails: a transport construction error is logged and the manager
    /// starts handle-less.
    #[must_use]
    pub fn new(config: ManagerConfig, transport: Arc<dyn Transport>) -> Arc<Self> {
        let policy = ReconnectPolicy::new(config.max_attempts(), config.base_delay());

        let manager = Arc::new(Self {
            config,
            transport,
            link: Mutex::new(Link {
                state: ConnectionState::Disconnected,
                handle: None,
                generation: 0,
            }),
            queue: Mutex::new(OutboundQueue::new()),
            policy: Mutex::new(policy),
        });

        manager.connect();
        manager
    }
}

// ============================================================================
// SocketManager - Public API
// ============================================================================

impl SocketManager {
    /// Returns the current transport handle, if any.
    ///
    /// Read fresh on every call; never blocks, never panics.
    #[must_use]
    pub fn socket(&self) -> Option<Arc<dyn TransportHandle>> {
        self.link.lock().handle.clone()
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.link.lock().state
    }

    /// Returns retries performed since the last successful connection.
    #[must_use]
    pub fn reconnect_attempts(&self) -> u32 {
        self.policy.lock().attempts()
    }

    /// Returns the number of messages waiting for a connected channel.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Sends a named event, or queues it while no connected channel exists.
    ///
    /// Best-effort, fire-and-forget: once handed to the transport, the
    /// message is considered delivered.
    pub fn emit(&self, event: impl Into<String>, payload: Value) {
        let event = event.into();

        let handle = {
            let link = self.link.lock();
            match (&link.state, &link.handle) {
                (ConnectionState::Connected, Some(handle)) => Some(Arc::clone(handle)),
                _ => None,
            }
        };

        match handle {
            Some(handle) => handle.emit(&event, payload),
            None => {
                warn!(event = %event, "Socket not connected, message queued");
                self.queue.lock().push(OutboundMessage::new(event, payload));
            }
        }
    }

    /// Registers an inbound event callback with the current handle.
    ///
    /// Returns `None` — and drops the registration — when no handle exists.
    /// Registrations are never queued or replayed on reconnect; callers that
    /// need durable subscriptions must re-register after observing a
    /// connected state.
    pub fn on(&self, event: &str, callback: EventCallback) -> Option<ListenerId> {
        let handle = self.link.lock().handle.clone();

        match handle {
            Some(handle) => Some(handle.on(event, callback)),
            None => {
                warn!(event = %event, "Socket not connected, listener dropped");
                None
            }
        }
    }

    /// Unregisters a callback from the current handle. No-op without one.
    pub fn off(&self, event: &str, listener: ListenerId) {
        let handle = self.link.lock().handle.clone();
        if let Some(handle) = handle {
            handle.off(event, listener);
        }
    }
}

// ============================================================================
// SocketManager - Lifecycle
// ============================================================================

impl SocketManager {
    /// Requests a new transport handle, replacing the previous one.
    ///
    /// Construction failure is caught, logged, and swallowed.
    fn connect(self: &Arc<Self>) {
        let generation = {
            let mut link = self.link.lock();
            // The previous handle reference is discarded before a new one
            // is created; at most one live reference exists at any time.
            link.handle = None;
            link.generation += 1;
            link.state = ConnectionState::Connecting;
            link.generation
        };

        debug!(generation, endpoint = %self.config.endpoint(), "Connecting");

        let options = self.config.connect_options();
        match self.transport.connect(self.config.endpoint(), &options) {
            Ok(handle) => {
                {
                    let mut link = self.link.lock();
                    if link.generation != generation {
                        debug!(generation, "Connect superseded, discarding handle");
                        return;
                    }
                    link.handle = Some(Arc::clone(&handle));
                }
                self.install_signal_listeners(&handle, generation);
            }
            Err(e) => {
                error!(error = %e, generation, "Socket connection error");
                let mut link = self.link.lock();
                if link.generation == generation {
                    link.state = ConnectionState::Disconnected;
                }
            }
        }
    }

    /// Subscribes to the reserved lifecycle signals on a fresh handle.
    fn install_signal_listeners(
        self: &Arc<Self>,
        handle: &Arc<dyn TransportHandle>,
        generation: u64,
    ) {
        let weak = Arc::downgrade(self);
        handle.on(
            signal::CONNECTED,
            Arc::new(move |_| {
                if let Some(manager) = weak.upgrade() {
                    manager.handle_signal(generation, Signal::Connected);
                }
            }),
        );

        let weak = Arc::downgrade(self);
        handle.on(
            signal::DISCONNECTED,
            Arc::new(move |_| {
                if let Some(manager) = weak.upgrade() {
                    manager.handle_signal(generation, Signal::Disconnected);
                }
            }),
        );

        let weak = Arc::downgrade(self);
        handle.on(
            signal::ERROR,
            Arc::new(move |payload| {
                error!(payload = %payload, "Socket error signal");
                if let Some(manager) = weak.upgrade() {
                    manager.handle_signal(generation, Signal::Error);
                }
            }),
        );
    }

    /// Applies a lifecycle signal through the transition table and runs the
    /// resulting side effect.
    fn handle_signal(self: &Arc<Self>, generation: u64, signal: Signal) {
        let effect = {
            let mut link = self.link.lock();
            if link.generation != generation {
                debug!(
                    generation,
                    current = link.generation,
                    ?signal,
                    "Ignoring signal from stale handle"
                );
                return;
            }

            let (next, effect) = transition(link.state, signal);
            debug!(from = %link.state, to = %next, ?signal, "State transition");
            link.state = next;
            effect
        };

        match effect {
            Some(SideEffect::FlushQueue) => {
                info!("Socket connected");
                self.policy.lock().reset();
                self.flush_queue();
            }
            Some(SideEffect::ScheduleReconnect) => {
                info!("Socket disconnected");
                self.schedule_reconnect();
            }
            None => {}
        }
    }
}

// ============================================================================
// SocketManager - Queue Flush
// ============================================================================

impl SocketManager {
    /// Drains the outbound queue head-first into the current handle.
    ///
    /// The handle is re-read on every iteration; if it vanishes mid-flush,
    /// the in-flight message is requeued at the head and the remainder stays
    /// queued for the next successful connection.
    fn flush_queue(&self) {
        if self.queue.lock().is_empty() {
            return;
        }

        let mut forwarded = 0usize;

        loop {
            // Scoped so the queue lock is released before forwarding.
            let popped = {
                let mut queue = self.queue.lock();
                queue.pop()
            };
            let Some(message) = popped else { break };

            let handle = self.link.lock().handle.clone();
            match handle {
                Some(handle) => {
                    let OutboundMessage { event, payload } = message;
                    handle.emit(&event, payload);
                    forwarded += 1;
                }
                None => {
                    warn!(event = %message.event, "Handle lost mid-flush, message requeued");
                    self.queue.lock().requeue(message);
                    break;
                }
            }
        }

        if forwarded > 0 {
            debug!(forwarded, "Outbound queue flushed");
        }
    }
}

// ============================================================================
// SocketManager - Reconnect Scheduling
// ============================================================================

impl SocketManager {
    /// Schedules exactly one delayed reconnect attempt, or gives up when the
    /// retry budget is exhausted.
    fn schedule_reconnect(self: &Arc<Self>) {
        let delay = {
            let policy = self.policy.lock();
            match policy.next_delay() {
                Some(delay) => delay,
                None => {
                    warn!(
                        max_attempts = self.config.max_attempts(),
                        "Max reconnection attempts reached, giving up"
                    );
                    return;
                }
            }
        };

        debug!(
            delay_ms = delay.as_millis() as u64,
            attempts = self.policy.lock().attempts(),
            "Reconnect scheduled"
        );

        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(manager) = weak.upgrade() {
                manager.policy.lock().record_attempt();
                manager.connect();
            }
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
