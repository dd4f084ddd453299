//! Metrics collection.
//!
//! # Metrics
//! - `breaker_transitions_total` (counter): state transitions by service, to-state
//! - `breaker_rejections_total` (counter): fast-failed calls by service
//! - `client_requests_total` (counter): classified attempts by service, outcome
//! - `client_retries_total` (counter): backoff retries by service
//!
//! # Design Decisions
//! - Low-overhead counter increments via the `metrics` facade
//! - Exposition (Prometheus endpoint etc.) is owned by whichever
//!   recorder the embedding process installs

use crate::breaker::state::CircuitState;

/// Record a breaker state transition.
pub fn record_transition(service: &str, to: CircuitState) {
    metrics::counter!(
        "breaker_transitions_total",
        "service" => service.to_string(),
        "to" => to.as_str()
    )
    .increment(1);
}

/// Record a call rejected by an open (or probe-saturated) breaker.
pub fn record_rejection(service: &str) {
    metrics::counter!(
        "breaker_rejections_total",
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record one classified request attempt.
pub fn record_request(service: &str, outcome: &'static str) {
    metrics::counter!(
        "client_requests_total",
        "service" => service.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a retry after backoff.
pub fn record_retry(service: &str) {
    metrics::counter!(
        "client_retries_total",
        "service" => service.to_string()
    )
    .increment(1);
}
