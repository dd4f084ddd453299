//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

/// Delay before retry attempt `attempt` (zero-based).
///
/// Grows as `base * 2^attempt`, capped at `max_ms`, plus up to 10%
/// jitter so concurrent retriers spread out.
pub fn delay_for_attempt(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    let exponential = 2u64.saturating_pow(attempt);
    let capped = base_ms.saturating_mul(exponential).min(max_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}
