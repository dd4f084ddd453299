//! Per-service circuit breaker.
//!
//! # Responsibilities
//! - Gate calls through `before_call` / `after_call`
//! - Track a rolling window of outcomes and trip open on threshold
//! - Admit bounded probes after the cool-down, close on probe quorum
//!
//! # Design Decisions
//! - Transitions are evaluated lazily inside before_call/after_call;
//!   there is no timer thread
//! - `CallPermit` is move-only, so each gate acquisition is reported
//!   back exactly once; double reporting does not compile
//! - All mutable state behind a single mutex per breaker instance

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::breaker::state::CircuitState;
use crate::breaker::window::RollingWindow;
use crate::config::{validate_breaker, CircuitBreakerConfig, ConfigError};
use crate::error::ClientError;
use crate::observability::metrics;

/// Admission token returned by [`CircuitBreaker::before_call`].
///
/// Must be passed to [`CircuitBreaker::after_call`] on the same breaker
/// exactly once, including on error paths (report `success = false`).
/// Permits are not cloneable and not transferable across breakers.
#[derive(Debug)]
#[must_use = "report the outcome back via after_call"]
pub struct CallPermit {
    acquired_at: Instant,
    probe: bool,
}

impl CallPermit {
    /// Whether this call was admitted as a half-open probe.
    pub fn is_probe(&self) -> bool {
        self.probe
    }

    /// When the gate admitted this call.
    pub fn acquired_at(&self) -> Instant {
        self.acquired_at
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    window: RollingWindow,
    /// Set while Open; cleared on leaving Open.
    opened_at: Option<Instant>,
    in_flight_probes: u32,
    /// Probe accounting for the current half-open episode.
    probes_completed: u32,
    probes_succeeded: u32,
}

/// Rolling-window circuit breaker for one logical service.
#[derive(Debug)]
pub struct CircuitBreaker {
    service: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    /// Build a breaker for one service.
    ///
    /// Misconfiguration (zero throughput floor, thresholds outside
    /// (0, 1]) fails here, never at call time.
    pub fn new(
        service: impl Into<String>,
        config: CircuitBreakerConfig,
    ) -> Result<Self, ConfigError> {
        validate_breaker(&config).map_err(ConfigError::Validation)?;
        let window = RollingWindow::new(config.rolling_window());
        Ok(Self {
            service: service.into(),
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                window,
                opened_at: None,
                in_flight_probes: 0,
                probes_completed: 0,
                probes_succeeded: 0,
            }),
        })
    }

    /// Logical service this breaker guards.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Current state, for reporting and tests.
    ///
    /// Does not evaluate the cool-down transition (only
    /// `before_call`/`after_call` do), so the observed state can lag
    /// one call behind elapsed-time eligibility.
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// Gate a call.
    ///
    /// Returns a permit when the call may proceed (Closed, or admitted
    /// as a half-open probe). Fails with [`ClientError::CircuitOpen`]
    /// while Open before the cool-down elapses, or while HalfOpen at
    /// probe capacity.
    pub fn before_call(&self) -> Result<CallPermit, ClientError> {
        let now = Instant::now();
        let mut inner = self.lock();

        // CLOSED → OPEN is evaluated lazily here as well as in
        // after_call, so a window that crossed the threshold rejects the
        // very next call.
        self.evaluate_trip(&mut inner, now);

        match inner.state {
            CircuitState::Closed => Ok(CallPermit {
                acquired_at: now,
                probe: false,
            }),
            CircuitState::Open => {
                let cooled_down = inner
                    .opened_at
                    .map_or(false, |t| now.saturating_duration_since(t) >= self.config.open_state());
                if cooled_down {
                    self.transition(&mut inner, CircuitState::HalfOpen);
                    inner.opened_at = None;
                    inner.in_flight_probes = 1;
                    Ok(CallPermit {
                        acquired_at: now,
                        probe: true,
                    })
                } else {
                    self.reject(&inner)
                }
            }
            CircuitState::HalfOpen => {
                if inner.in_flight_probes < self.config.half_open_max_in_flight {
                    inner.in_flight_probes += 1;
                    Ok(CallPermit {
                        acquired_at: now,
                        probe: true,
                    })
                } else {
                    self.reject(&inner)
                }
            }
        }
    }

    /// Report the outcome for a permit issued by `before_call`.
    pub fn after_call(&self, permit: CallPermit, success: bool) {
        let now = Instant::now();
        let mut inner = self.lock();

        inner.window.record(now, success);

        if permit.probe {
            inner.in_flight_probes = inner.in_flight_probes.saturating_sub(1);
            // A probe outcome only counts toward the half-open episode
            // it was issued in; if the breaker already moved on (e.g. a
            // sibling probe failed and reopened it), the outcome is just
            // a window entry.
            if inner.state == CircuitState::HalfOpen {
                inner.probes_completed += 1;
                if success {
                    inner.probes_succeeded += 1;
                    let ratio = f64::from(inner.probes_succeeded) / f64::from(inner.probes_completed);
                    if ratio >= self.config.success_quorum {
                        self.transition(&mut inner, CircuitState::Closed);
                        inner.opened_at = None;
                        inner.window.clear();
                    }
                } else {
                    // Any probe failure reopens immediately and restarts
                    // the cool-down clock.
                    self.transition(&mut inner, CircuitState::Open);
                    inner.opened_at = Some(now);
                }
            }
            return;
        }

        self.evaluate_trip(&mut inner, now);
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().expect("breaker lock poisoned")
    }

    /// CLOSED → OPEN when the window holds enough throughput and the
    /// failure ratio crosses the threshold. A single crossing trips
    /// exactly once; once Open this is a no-op.
    fn evaluate_trip(&self, inner: &mut BreakerInner, now: Instant) {
        if inner.state != CircuitState::Closed {
            return;
        }
        let (total, failures) = inner.window.totals(now);
        if total < self.config.min_throughput as usize {
            return;
        }
        let ratio = failures as f64 / total as f64;
        if ratio >= self.config.failure_threshold {
            tracing::warn!(
                service = %self.service,
                failures,
                total,
                ratio,
                "Failure threshold crossed, opening circuit"
            );
            self.transition(&mut *inner, CircuitState::Open);
            inner.opened_at = Some(now);
        }
    }

    fn transition(&self, inner: &mut BreakerInner, to: CircuitState) {
        let from = inner.state;
        inner.state = to;
        inner.in_flight_probes = 0;
        inner.probes_completed = 0;
        inner.probes_succeeded = 0;
        tracing::info!(
            service = %self.service,
            from = from.as_str(),
            to = to.as_str(),
            "Circuit state transition"
        );
        metrics::record_transition(&self.service, to);
    }

    fn reject(&self, inner: &BreakerInner) -> Result<CallPermit, ClientError> {
        tracing::debug!(
            service = %self.service,
            state = inner.state.as_str(),
            "Call rejected by circuit breaker"
        );
        metrics::record_rejection(&self.service);
        Err(ClientError::CircuitOpen {
            service: self.service.clone(),
        })
    }
}
