//! Reconnection policy.
//!
//! Bounded retry with linear backoff, represented as explicit data plus a
//! pure delay function. Each disconnect schedules exactly one future attempt;
//! the delay is `base_delay * attempts` using the pre-increment counter, so
//! the first retry after a fresh disconnect is immediate and each subsequent
//! retry without an intervening successful connection waits one unit longer.
//!
//! The counter resets to zero on every successful connection. Once it
//! reaches `max_attempts` the policy is exhausted for the lifetime of the
//! manager instance.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// ReconnectPolicy
// ============================================================================

/// Bounded linear-backoff retry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReconnectPolicy {
    /// Retries performed since the last successful connection.
    attempts: u32,

    /// Retry budget; exhaustion is permanent.
    max_attempts: u32,

    /// Backoff unit.
    base_delay: Duration,
}

impl ReconnectPolicy {
    pub(crate) fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            base_delay,
        }
    }

    /// Returns the delay before the next retry, or `None` when the budget
    /// is exhausted.
    ///
    /// Pure: does not consume an attempt. The caller increments via
    /// [`record_attempt`](Self::record_attempt) once the timer fires.
    pub(crate) fn next_delay(&self) -> Option<Duration> {
        if self.is_exhausted() {
            None
        } else {
            Some(self.base_delay * self.attempts)
        }
    }

    /// Consumes one attempt from the budget.
    pub(crate) fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Resets the counter after a successful connection.
    pub(crate) fn reset(&mut self) {
        self.attempts = 0;
    }

    /// Returns `true` once the retry budget is spent.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }
}

// ============================================================================
// Tests
// ============================================================================
