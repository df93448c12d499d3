//! Process-wide accessor.
//!
//! Exposes exactly one shared [`SocketManager`] per process, created lazily
//! on first access, plus [`SocketApi`] — a thin convenience surface
//! (`socket`/`emit`/`on`/`off`) that delegates per call so consumers always
//! observe the current transport handle rather than a snapshot captured at
//! first use.
//!
//! Modules that need the connection should receive a [`SocketApi`] (or the
//! manager itself) rather than reaching into this module's global directly.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::config::ManagerConfig;
use crate::identifiers::ListenerId;
use crate::manager::SocketManager;
use crate::transport::{EventCallback, Transport, TransportHandle};

// ============================================================================
// Global Instance
// ============================================================================

static INSTANCE: OnceCell<Arc<SocketManager>> = OnceCell::new();

/// Returns the process-wide manager, creating it on first call.
///
/// Creation reads [`ManagerConfig::from_env`] and immediately initiates a
/// connection attempt. Idempotent: later calls return the same instance and
/// ignore the supplied transport.
pub fn get_instance(transport: Arc<dyn Transport>) -> Arc<SocketManager> {
    Arc::clone(INSTANCE.get_or_init(|| SocketManager::new(ManagerConfig::from_env(), transport)))
}

/// Returns the process-wide manager if one has been created.
#[must_use]
pub fn try_instance() -> Option<Arc<SocketManager>> {
    INSTANCE.get().cloned()
}

/// Returns a [`SocketApi`] over the process-wide manager, creating the
/// manager on first call.
pub fn use_socket(transport: Arc<dyn Transport>) -> SocketApi {
    SocketApi::new(get_instance(transport))
}

// ============================================================================
// SocketApi
// ============================================================================

/// Convenience surface bound to one manager.
///
/// Every method re-reads the manager's state on call, so a handle replaced
/// by a reconnect is always the one observed.
#[derive(Clone)]
pub struct SocketApi {
    manager: Arc<SocketManager>,
}

impl SocketApi {
    /// Binds an API surface to the given manager.
    #[inline]
    #[must_use]
    pub fn new(manager: Arc<SocketManager>) -> Self {
        Self { manager }
    }

    /// Returns the current transport handle, read fresh.
    #[must_use]
    pub fn socket(&self) -> Option<Arc<dyn TransportHandle>> {
        self.manager.socket()
    }

    /// Sends or queues a named event. See [`SocketManager::emit`].
    pub fn emit(&self, event: impl Into<String>, payload: Value) {
        self.manager.emit(event, payload);
    }

    /// Registers an inbound event callback. See [`SocketManager::on`].
    pub fn on(&self, event: &str, callback: EventCallback) -> Option<ListenerId> {
        self.manager.on(event, callback)
    }

    /// Unregisters a callback. See [`SocketManager::off`].
    pub fn off(&self, event: &str, listener: ListenerId) {
        self.manager.off(event, listener);
    }
}

// ============================================================================
// Tests
// ============================================================================
