//! Transport capability traits.
//!
//! These traits are the seam between the manager and a concrete transport
//! library. Framing, handshake, and encryption all live behind them.
//!
//! All methods are synchronous and must return immediately: a transport is
//! expected to establish connectivity in the background and report the
//! outcome through the reserved [`signal`] events.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::identifiers::ListenerId;

// ============================================================================
// Lifecycle Signals
// ============================================================================

/// Reserved event names a transport handle must emit.
pub mod signal {
    /// Channel became connected.
    pub const CONNECTED: &str = "connected";

    /// Channel was lost.
    pub const DISCONNECTED: &str = "disconnected";

    /// Transport-level error. Informational only.
    pub const ERROR: &str = "error";
}

// ============================================================================
// Types
// ============================================================================

/// Callback invoked with the payload of an inbound event.
///
/// Shared so a handle may invoke the same callback repeatedly.
pub type EventCallback = Arc<dyn Fn(Value) + Send + Sync + 'static>;

// ============================================================================
// ConnectOptions
// ============================================================================

/// Fixed options passed to [`Transport::connect`] on every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Prefer a persistent (long-lived) channel.
    pub persistent: bool,

    /// Whether the transport may reconnect on its own.
    ///
    /// The manager always passes `false`: it owns retry scheduling itself so
    /// the two layers never race.
    pub transport_reconnect: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            persistent: true,
            transport_reconnect: false,
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Factory for transport handles.
///
/// One handle is created per connection attempt; the manager discards the
/// previous handle reference before asking for a new one.
pub trait Transport: Send + Sync {
    /// Creates a new transport handle for the given endpoint.
    ///
    /// Must not block on network I/O: connectivity is established in the
    /// background and reported via the [`signal::CONNECTED`] event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) when a handle
    /// cannot be constructed at all. The manager logs and swallows this.
    fn connect(&self, url: &Url, options: &ConnectOptions) -> Result<Arc<dyn TransportHandle>>;
}

// ============================================================================
// TransportHandle
// ============================================================================

/// One live bidirectional channel.
///
/// Exclusively owned by the manager; replaced, not shared, on each reconnect
/// attempt.
pub trait TransportHandle: Send + Sync {
    /// Sends a named event with an opaque payload. Fire-and-forget.
    fn emit(&self, event: &str, payload: Value);

    /// Registers a callback for inbound events with the given name.
    ///
    /// Reserved names in [`signal`] carry lifecycle notifications.
    fn on(&self, event: &str, callback: EventCallback) -> ListenerId;

    /// Unregisters a previously registered callback.
    fn off(&self, event: &str, listener: ListenerId);

    /// Returns `true` while the channel is connected.
    fn is_connected(&self) -> bool;
}

// ============================================================================
// Tests
// ============================================================================
