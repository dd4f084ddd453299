//! Circuit state machine states.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: service assumed down, calls fail fast
//! - HalfOpen: testing whether the service recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure ratio >= threshold with min throughput in window
//! Open → HalfOpen: cool-down elapsed (evaluated lazily in before_call)
//! HalfOpen → Closed: probe quorum met (window cleared)
//! HalfOpen → Open: any probe failure (cool-down clock reset)
//! ```

/// Circuit breaker state. Exactly one state holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    /// Stable label for logging and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
