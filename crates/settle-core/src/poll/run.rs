//! Poll loop: evaluate a predicate until it holds for the debounce streak or the budget runs out.

use std::future::Future;
use std::time::Duration;

use super::step::Step;
use crate::budget::RetryBudget;
use crate::config::PollConfig;
use crate::failure::{classify, BoxError, Failure};

/// Pause between two evaluations, for both the "false" and the "true but unconfirmed" paths.
pub const PAUSE_INTERVAL: Duration = Duration::from_millis(300);

/// Debounced poller.
///
/// Some observed systems (brokers returning stale cluster metadata, for one)
/// can report the awaited state before it is actually stable, so a single
/// `true` is not trusted: the predicate has to return `true` on
/// `debounce + 1` consecutive evaluations, and every `false` restarts the
/// streak. All evaluations share one [`RetryBudget`].
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    timeout: Duration,
    debounce: u32,
    interval: Duration,
}

impl Poller {
    pub fn new(timeout: Duration, debounce: u32) -> Self {
        Self {
            timeout,
            debounce,
            interval: PAUSE_INTERVAL,
        }
    }

    pub fn from_config(cfg: &PollConfig) -> Self {
        Self::new(cfg.timeout(), cfg.debounce).interval(cfg.interval())
    }

    /// Override the fixed pause between evaluations.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn debounce(&self) -> u32 {
        self.debounce
    }

    /// Drive `predicate` to a terminal outcome.
    ///
    /// Returns `Ok(true)` once the streak completes and `Ok(false)` when the
    /// budget is exhausted; running out of time is not an error. An `Err`
    /// from the predicate is classified and returned at once, without
    /// further evaluations.
    ///
    /// The budget is checked before every evaluation: an exhausted budget
    /// never triggers one more call. There is no other cancellation; a
    /// caller that needs it makes the predicate watch its own signal.
    pub async fn run<F, Fut, E>(&self, mut predicate: F) -> Result<bool, Failure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: Into<BoxError> + 'static,
    {
        let budget = RetryBudget::new(self.timeout);
        let mut attempt = 0u32;
        let mut step = Step::Continue(self.debounce);

        loop {
            step = match step {
                Step::Succeed => {
                    tracing::debug!(attempt, elapsed = ?budget.elapsed(), "poll settled");
                    return Ok(true);
                }
                Step::Expire => {
                    tracing::debug!(attempt, timeout = ?self.timeout, "poll timed out");
                    return Ok(false);
                }
                Step::Continue(_) if budget.expired() => Step::Expire,
                Step::Continue(remaining) => {
                    attempt += 1;
                    let matched = match predicate().await {
                        Ok(matched) => matched,
                        Err(e) => {
                            let failure = classify(e);
                            tracing::debug!(attempt, "predicate failed: {}", failure.chain());
                            return Err(failure);
                        }
                    };
                    tracing::trace!(attempt, matched, remaining, "predicate evaluated");

                    let next = Step::observe(matched, remaining, self.debounce);
                    if next != Step::Succeed {
                        tokio::time::sleep(self.interval).await;
                    }
                    next
                }
            };
        }
    }
}

/// Poll `predicate` with the default pause; see [`Poller::run`].
pub async fn poll<F, Fut, E>(predicate: F, timeout: Duration, debounce: u32) -> Result<bool, Failure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: Into<BoxError> + 'static,
{
    Poller::new(timeout, debounce).run(predicate).await
}
