//! Connection state machine.
//!
//! Transitions are pure: [`transition`] maps `(state, signal)` to the next
//! state plus at most one side effect, and the manager core runs the effect.
//! Keeping the table separate from the effects makes every transition
//! testable without a transport.
//!
//! # Transition Table
//!
//! | From | Signal | To | Effect |
//! |------|--------|----|--------|
//! | `Connecting`/`Disconnected` | `Connected` | `Connected` | flush queue |
//! | `Connected`/`Connecting` | `Disconnected` | `Disconnected` | schedule reconnect |
//! | any | `Error` | unchanged | none (log only) |
//! | `Connected` | `Connected` | `Connected` | none |
//! | `Disconnected` | `Disconnected` | `Disconnected` | none |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// ConnectionState
// ============================================================================

/// Connectivity of the managed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No live channel; a retry may or may not be pending.
    Disconnected,

    /// A connection attempt is in flight.
    Connecting,

    /// The channel is live; emits are forwarded immediately.
    Connected,
}

impl ConnectionState {
    /// Returns `true` if the channel is live.
    #[inline]
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Signal
// ============================================================================

/// Lifecycle signal received from the transport handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    /// Transport reported the channel connected.
    Connected,

    /// Transport reported the channel lost.
    Disconnected,

    /// Transport reported an error. Never changes state.
    Error,
}

// ============================================================================
// SideEffect
// ============================================================================

/// Effect the manager core must run after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SideEffect {
    /// Reset the retry counter and drain the outbound queue.
    FlushQueue,

    /// Schedule one delayed reconnect attempt.
    ScheduleReconnect,
}

// ============================================================================
// Transition Function
// ============================================================================

/// Computes the next state and side effect for a lifecycle signal.
pub(crate) fn transition(
    state: ConnectionState,
    signal: Signal,
) -> (ConnectionState, Option<SideEffect>) {
    use ConnectionState::{Connected, Connecting, Disconnected};

    match (state, signal) {
        (Disconnected | Connecting, Signal::Connected) => {
            (Connected, Some(SideEffect::FlushQueue))
        }
        (Connected, Signal::Connected) => (Connected, None),

        (Connected | Connecting, Signal::Disconnected) => {
            (Disconnected, Some(SideEffect::ScheduleReconnect))
        }
        (Disconnected, Signal::Disconnected) => (Disconnected, None),

        (state, Signal::Error) => (state, None),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use ConnectionState::{Connected, Connecting, Disconnected};

    #[test]
    fn test_connect_from_connecting_flushes() {
        let (next, effect) = transition(Connecting, Signal::Connected);
        assert_eq!(next, Connected);
        assert_eq!(effect, Some(SideEffect::FlushQueue));
    }

    #[test]
    fn test_connect_from_disconnected_flushes() {
        let (next, effect) = transition(Disconnected, Signal::Connected);
        assert_eq!(next, Connected);
        assert_eq!(effect, Some(SideEffect::FlushQueue));
    }

    #[test]
    fn test_duplicate_connected_is_inert() {
        let (next, effect) = transition(Connected, Signal::Connected);
        assert_eq!(next, Connected);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_disconnect_schedules_reconnect() {
        let (next, effect) = transition(Connected, Signal::Disconnected);
        assert_eq!(next, Disconnected);
        assert_eq!(effect, Some(SideEffect::ScheduleReconnect));
    }

    #[test]
    fn test_disconnect_while_connecting_schedules_reconnect() {
        let (next, effect) = transition(Connecting, Signal::Disconnected);
        assert_eq!(next, Disconnected);
        assert_eq!(effect, Some(SideEffect::ScheduleReconnect));
    }

    #[test]
    fn test_duplicate_disconnected_is_inert() {
        let (next, effect) = transition(Disconnected, Signal::Disconnected);
        assert_eq!(next, Disconnected);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_error_never_changes_state() {
        for state in [Disconnected, Connecting, Connected] {
            let (next, effect) = transition(state, Signal::Error);
            assert_eq!(next, state);
            assert_eq!(effect, None);
        }
    }

    #[test]
    fn test_is_connected() {
        assert!(Connected.is_connected());
        assert!(!Connecting.is_connected());
        assert!(!Disconnected.is_connected());
    }

    #[test]
    fn test_display() {
        assert_eq!(Connected.to_string(), "connected");
        assert_eq!(Connecting.to_string(), "connecting");
        assert_eq!(Disconnected.to_string(), "disconnected");
    }
}
