//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries and examples
//! - Honor `RUST_LOG` when set, fall back to a given default filter
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - The library itself only emits events; embedding applications that
//!   already install a subscriber should not call `init`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the default subscriber. Call once at process start.
///
/// `default_filter` is used when `RUST_LOG` is unset, e.g.
/// `"resilient_http=debug"`.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
