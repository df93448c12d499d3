//! Connection manager.
//!
//! Composes the transport handle slot, the outbound queue, the reconnection
//! policy, and the connection state machine.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | [`SocketManager`]: lifecycle, emit/on/off, flush, scheduling |
//! | `policy` | Bounded linear-backoff retry state |
//! | `queue` | FIFO outbound buffer |
//! | `state` | Pure connection state machine |

// ============================================================================
// Submodules
// ============================================================================

/// Socket manager core.
pub mod core;

/// Reconnection policy.
pub(crate) mod policy;

/// Outbound message queue.
pub(crate) mod queue;

/// Connection state machine.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::SocketManager;
pub use self::state::ConnectionState;
