//! Socket Manager - Persistent connection management for one bidirectional
//! message channel.
//!
//! This library owns the lifecycle of a single client-to-endpoint channel:
//! automatic reconnection with bounded retry and linear backoff, outbound
//! message buffering while disconnected, and a pass-through registry for
//! inbound event callbacks.
//!
//! # Architecture
//!
//! The wire protocol is not implemented here. A transport library supplies
//! the capability behind two traits:
//!
//! - [`Transport`] creates one [`TransportHandle`] per connection attempt
//! - [`TransportHandle`] carries `emit`/`on`/`off` and reports connectivity
//!   through three reserved signals (`connected`, `disconnected`, `error`)
//!
//! Key design principles:
//!
//! - Exactly one live transport handle at a time; a reconnect discards the
//!   previous reference before creating a new one
//! - Outbound messages queued while disconnected are flushed strictly FIFO
//!   on the `connected` transition
//! - Retry delay grows linearly (`base_delay * attempts`) and stops
//!   permanently once the budget is exhausted
//! - No operation on the manager ever returns an error or panics; failures
//!   degrade to warnings and queued/dropped work
//!
//! # Quick Start
//!
//! ```ignore
//! use socket_manager::{ManagerConfig, SocketManager};
//! use serde_json::json;
//!
//! // `transport` is any Arc<dyn Transport> from a transport library.
//! let manager = SocketManager::new(ManagerConfig::from_env(), transport);
//!
//! // Queued now, flushed in order once the channel connects.
//! manager.emit("chat.message", json!({ "text": "hi" }));
//!
//! // Listener relay: registered only if a handle currently exists.
//! let id = manager.on("chat.message", std::sync::Arc::new(|payload| {
//!     println!("inbound: {payload}");
//! }));
//! ```
//!
//! Listener registrations are deliberately not replayed across reconnects;
//! callers needing durable subscriptions re-register after observing
//! [`ConnectionState::Connected`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Endpoint and retry configuration |
//! | [`error`] | Error types and [`Result`] alias (transport boundary) |
//! | [`identifiers`] | Type-safe listener tokens |
//! | [`manager`] | Connection manager: state machine, queue, policy |
//! | [`protocol`] | Outbound message type |
//! | [`socket`] | Process-wide accessor and convenience API |
//! | [`transport`] | Transport capability traits |

// ============================================================================
// Modules
// ============================================================================

/// Endpoint and retry configuration.
pub mod config;

/// Error types and result aliases.
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Connection manager: lifecycle, queue, policy, state machine.
pub mod manager;

/// Outbound message type.
pub mod protocol;

/// Process-wide accessor.
pub mod socket;

/// Transport capability layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Configuration
pub use config::{DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR, ManagerConfig};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::ListenerId;

// Manager types
pub use manager::{ConnectionState, SocketManager};

// Message types
pub use protocol::OutboundMessage;

// Accessor types
pub use socket::{SocketApi, get_instance, try_instance, use_socket};

// Transport capability
pub use transport::{ConnectOptions, EventCallback, Transport, TransportHandle, signal};
