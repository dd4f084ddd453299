//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! resilient call layer. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the resilient call layer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Breaker settings applied to each service on first use.
    pub breaker: CircuitBreakerConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// HTTP client settings.
    pub client: HttpClientConfig,
}

/// Circuit breaker settings for one logical service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Failure ratio in (0, 1] that trips the breaker open.
    pub failure_threshold: f64,

    /// Minimum number of outcomes in the window before the failure
    /// ratio is considered meaningful.
    pub min_throughput: u32,

    /// Rolling window over which outcomes are counted, in milliseconds.
    pub rolling_window_ms: u64,

    /// Cool-down before a half-open probe is allowed, in milliseconds.
    pub open_state_ms: u64,

    /// Maximum concurrent probe calls while half-open.
    pub half_open_max_in_flight: u32,

    /// Fraction of completed probes in a half-open episode that must
    /// succeed before the breaker closes.
    pub success_quorum: f64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 0.5,
            min_throughput: 10,
            rolling_window_ms: 10_000,
            open_state_ms: 30_000,
            half_open_max_in_flight: 1,
            success_quorum: 1.0,
        }
    }
}

impl CircuitBreakerConfig {
    /// Rolling window span as a [`Duration`].
    pub fn rolling_window(&self) -> Duration {
        Duration::from_millis(self.rolling_window_ms)
    }

    /// Open-state cool-down as a [`Duration`].
    pub fn open_state(&self) -> Duration {
        Duration::from_millis(self.open_state_ms)
    }
}

/// Retry configuration. Also usable as a per-call policy override.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial call.
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// Policy that disables retries entirely.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Per-request timeout in milliseconds, enforced by the transport.
    pub request_timeout_ms: u64,

    /// User-Agent header sent on outbound requests.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 5000,
            user_agent: concat!("resilient-http/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
