//! Resilient HTTP call layer.
//!
//! Per-service circuit breaking combined with a retrying HTTP client
//! wrapper. Protects callers from cascading failures by tracking
//! rolling failure rates per logical service and deciding, independently
//! of any single call, whether further calls should be attempted,
//! short-circuited, or trial-probed.
//!
//! # Architecture Overview
//!
//! ```text
//! caller
//!   → ResilientHttpClient::request(service, method, url)
//!       → BreakerRegistry::get_or_create(service)
//!       → CircuitBreaker::before_call()        gate: Closed / Open / HalfOpen
//!       → Transport::send()                    reqwest in production
//!       → classify                             transport error, 5xx = failure
//!                                              anything else (incl. 4xx) = success
//!       → CircuitBreaker::after_call(permit, success)
//!       → on failure: jittered exponential backoff, then a fresh
//!         gate decision for the next attempt
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use resilient_http::{BreakerRegistry, ResilienceConfig, ResilientHttpClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResilienceConfig::default();
//! let registry = Arc::new(BreakerRegistry::new(config.breaker.clone())?);
//! let client = ResilientHttpClient::new(registry, &config)?;
//!
//! let response = client.get("billing", "http://billing.internal/health").await?;
//! println!("billing says {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod breaker;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;

pub use breaker::{BreakerRegistry, CallPermit, CircuitBreaker, CircuitState};
pub use client::{HttpResponse, ReqwestTransport, ResilientHttpClient, Transport, TransportRequest};
pub use config::{CircuitBreakerConfig, HttpClientConfig, ResilienceConfig, RetryConfig};
pub use error::{ClientError, TransportError};
