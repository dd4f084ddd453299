//! Circuit breaker subsystem.
//!
//! # Data Flow
//! ```text
//! Call to a guarded service:
//!     → registry.rs (get-or-create breaker by service name)
//!     → circuit.rs before_call() (gate; lazy state evaluation)
//!     → caller performs the call
//!     → circuit.rs after_call(permit, success)
//!         → window.rs (record outcome, evict stale entries)
//!         → state transitions (trip open / close / reopen)
//! ```
//!
//! # Design Decisions
//! - Per-service breaker, held in an injectable registry (not global)
//! - Transitions evaluated lazily inside before_call/after_call; no
//!   background timer thread
//! - One mutex per breaker; services never contend with each other
//! - Fail fast while open; bounded probes while half-open

pub mod circuit;
pub mod registry;
pub mod state;
mod window;

pub use circuit::{CallPermit, CircuitBreaker};
pub use registry::BreakerRegistry;
pub use state::CircuitState;
