//! Rolling outcome window.
//!
//! # Responsibilities
//! - Record (timestamp, success) entries for recent calls
//! - Evict entries older than the window span, lazily on each access
//! - Report (total, failures) for threshold evaluation
//!
//! # Design Decisions
//! - VecDeque with front eviction: entries arrive in time order, so
//!   eviction is O(evicted) and memory stays bounded by the window span
//! - No background timer; callers drive eviction

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct RollingWindow {
    span: Duration,
    outcomes: VecDeque<(Instant, bool)>,
}

impl RollingWindow {
    pub fn new(span: Duration) -> Self {
        Self {
            span,
            outcomes: VecDeque::new(),
        }
    }

    /// Record one outcome, evicting stale entries first.
    pub fn record(&mut self, now: Instant, success: bool) {
        self.evict(now);
        self.outcomes.push_back((now, success));
    }

    /// Drop entries older than the window span.
    pub fn evict(&mut self, now: Instant) {
        while let Some(&(ts, _)) = self.outcomes.front() {
            if now.saturating_duration_since(ts) > self.span {
                self.outcomes.pop_front();
            } else {
                break;
            }
        }
    }

    /// (total, failures) currently inside the window.
    pub fn totals(&mut self, now: Instant) -> (usize, usize) {
        self.evict(now);
        let total = self.outcomes.len();
        let failures = self.outcomes.iter().filter(|(_, ok)| !ok).count();
        (total, failures)
    }

    /// Start fresh accounting, e.g. after the breaker closes.
    pub fn clear(&mut self) {
        self.outcomes.clear();
    }
}
