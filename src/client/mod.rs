//! Resilient HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! request(service, method, url):
//!     → registry (breaker by service name)
//!     → before_call() gate (open circuit fails fast, no I/O)
//!     → transport.rs (reqwest in production, mock in tests)
//!     → classify: transport error / 5xx = failure, 4xx = success
//!     → after_call(permit, success)
//!     → on failure: backoff.rs (jittered exponential wait), retry
//! ```
//!
//! # Design Decisions
//! - Every attempt makes a fresh breaker decision; a circuit opening
//!   mid-retry-loop short-circuits the remaining attempts
//! - Circuit rejections are surfaced directly, never retried
//! - 4xx responses are a caller problem, not a service-health signal
//! - Per-request timeout is enforced by the transport, not the breaker

pub mod backoff;
pub mod resilient;
pub mod transport;

pub use resilient::ResilientHttpClient;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportRequest};
