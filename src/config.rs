//! Manager configuration.
//!
//! Provides a type-safe interface for configuring the socket manager:
//! endpoint URL, retry budget, and backoff delay.
//!
//! The endpoint is sourced from the `SOCKET_URL` environment variable with a
//! fixed fallback of `http://localhost:5000`.
//!
//! # Example
//!
//! ```ignore
//! use socket_manager::ManagerConfig;
//! use std::time::Duration;
//!
//! let config = ManagerConfig::from_env()
//!     .with_max_attempts(10)
//!     .with_base_delay(Duration::from_millis(500));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::transport::ConnectOptions;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable holding the endpoint URL.
pub const ENDPOINT_ENV_VAR: &str = "SOCKET_URL";

/// Fallback endpoint used when `SOCKET_URL` is unset or invalid.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Default retry budget per manager instance.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff unit; retry N waits `base_delay * attempts`.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

// ============================================================================
// ManagerConfig
// ============================================================================

/// Socket manager configuration.
///
/// Controls which endpoint the manager connects to and how its reconnection
/// policy is parameterized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Remote endpoint URL.
    endpoint: Url,

    /// Reconnect attempts before giving up permanently.
    max_attempts: u32,

    /// Linear backoff unit between reconnect attempts.
    base_delay: Duration,
}

// ============================================================================
// Constructors
// ============================================================================

impl ManagerConfig {
    /// Creates a configuration for the given endpoint with default retry
    /// settings.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// Reads the endpoint from [`ENDPOINT_ENV_VAR`]; falls back to
    /// [`DEFAULT_ENDPOINT`] when the variable is unset or does not parse as
    /// a URL.
    #[must_use]
    pub fn from_env() -> Self {
        let value = std::env::var(ENDPOINT_ENV_VAR).ok();
        Self::from_endpoint_value(value.as_deref())
    }

    /// Creates a configuration from an optional endpoint string.
    pub(crate) fn from_endpoint_value(value: Option<&str>) -> Self {
        let endpoint = match value {
            Some(raw) => match Url::parse(raw) {
                Ok(url) => url,
                Err(e) => {
                    warn!(
                        raw = %raw,
                        error = %e,
                        fallback = DEFAULT_ENDPOINT,
                        "Invalid endpoint URL in environment, using fallback"
                    );
                    Self::default_endpoint()
                }
            },
            None => Self::default_endpoint(),
        };

        Self::new(endpoint)
    }

    /// Parses the fallback endpoint.
    fn default_endpoint() -> Url {
        // The fallback is a literal and always parses.
        Url::parse(DEFAULT_ENDPOINT).expect("default endpoint URL is valid")
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ManagerConfig {
    /// Sets the retry budget.
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the linear backoff unit.
    #[inline]
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl ManagerConfig {
    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the retry budget.
    #[inline]
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the linear backoff unit.
    #[inline]
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the fixed options passed to the transport on every connect.
    ///
    /// A persistent channel is requested and transport-level reconnection is
    /// disabled: retry scheduling is owned by the manager.
    #[inline]
    #[must_use]
    pub const fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            persistent: true,
            transport_reconnect: false,
        }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(Self::default_endpoint())
    }
}

// ============================================================================
// Tests
// ============================================================================
