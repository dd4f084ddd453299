//! Error taxonomy for the resilient call layer.
//!
//! # Design Decisions
//! - `CircuitOpen` is a design-intended fast-fail, not a bug; it is
//!   surfaced directly and never retried internally
//! - Transport and 5xx failures are transient; the client retries them
//!   up to the configured bound before surfacing them
//! - 4xx responses are not errors at this layer; they are returned as
//!   normal responses for application-level handling
//! - Misconfiguration fails at construction time, never at call time

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by [`ResilientHttpClient`](crate::ResilientHttpClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The breaker is open (or half-open at probe capacity).
    /// No network I/O was attempted for this call.
    #[error("circuit open for service '{service}'")]
    CircuitOpen {
        /// Logical service whose breaker rejected the call.
        service: String,
    },

    /// Transport-level failure, surfaced after retries were exhausted.
    #[error("transport error calling service '{service}': {source}")]
    Transport {
        service: String,
        #[source]
        source: TransportError,
    },

    /// Upstream returned a 5xx status, surfaced after retries were exhausted.
    #[error("server error from service '{service}': {status}")]
    ServerError {
        service: String,
        status: StatusCode,
    },

    /// The request URL failed to parse.
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failures below the HTTP layer: the request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response within the per-request deadline.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Connection could not be established (refused, DNS, TLS).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport failure (stream reset, malformed response).
    #[error("transport failure: {0}")]
    Other(String),
}
