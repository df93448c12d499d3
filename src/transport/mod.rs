//! Transport capability layer.
//!
//! The manager does not implement a wire protocol. It drives an externally
//! supplied transport through two small traits:
//!
//! - [`Transport`] — creates one handle per connection attempt
//! - [`TransportHandle`] — one live channel: `emit`/`on`/`off`/`is_connected`
//!
//! # Lifecycle Signals
//!
//! A handle reports connectivity by firing callbacks registered under the
//! reserved event names in [`signal`]:
//!
//! | Signal | Manager reaction |
//! |--------|------------------|
//! | [`signal::CONNECTED`] | reset retry counter, flush outbound queue |
//! | [`signal::DISCONNECTED`] | schedule a single delayed reconnect |
//! | [`signal::ERROR`] | log only, no state change |

// ============================================================================
// Submodules
// ============================================================================

/// Capability traits and connect options.
pub mod capability;

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use capability::{ConnectOptions, EventCallback, Transport, TransportHandle, signal};
