//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! breaker + client produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters by service and outcome)
//!
//! Consumers:
//!     → whatever subscriber/recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; subscribers and exporters belong to the
//!   embedding application
//! - Metric updates are cheap counter increments
//! - Labels carry service name and state/outcome

pub mod logging;
pub mod metrics;
