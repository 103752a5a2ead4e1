//! Wall-clock budget shared across the attempts of one poll.
//!
//! Each poll owns exactly one budget; it is created with the caller's total
//! timeout and shrinks as time passes, never growing back.

use std::time::Duration;
use tokio::time::Instant;

/// Remaining time for a chain of attempts.
///
/// Reads the tokio clock, so paused-time tests see virtual time. Outside a
/// runtime the tokio clock falls back to the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct RetryBudget {
    start: Instant,
    total: Duration,
}

impl RetryBudget {
    /// Start a budget of `total` from now.
    pub fn new(total: Duration) -> Self {
        Self {
            start: Instant::now(),
            total,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Time spent since the budget was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// `total - elapsed`, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed())
    }

    /// True once no time is left; no further attempts should be made.
    pub fn expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Whether `last + interval` lies strictly in the past.
    pub fn is_expired(last: Instant, interval: Duration) -> bool {
        last + interval < Instant::now()
    }
}
