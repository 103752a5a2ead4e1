//! Blocking wait on the caller's thread.
//!
//! Unlike [`super::poll`], running out of time is an error here, and errors
//! from the check are tolerated until the deadline.

use std::time::Duration;

use crate::budget::RetryBudget;
use crate::failure::{classify, BoxError, Failure};

/// Timeout used by [`wait_for_default`].
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between two checks of [`wait_for`].
pub const WAIT_INTERVAL: Duration = Duration::from_secs(1);

/// Why a blocking wait gave up.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The check never returned `true` and never failed.
    #[error("timed out after {0:?} waiting for condition")]
    TimedOut(Duration),
    /// The deadline passed; this is the last error the check returned.
    #[error("condition not reached; last check failed")]
    Failed(#[source] Failure),
}

/// Block until `done` returns `Ok(true)`, re-checking every second for at most `timeout`.
///
/// Errors from `done` are remembered and the loop keeps going; if the
/// deadline passes, the most recent one is returned as
/// [`WaitError::Failed`], otherwise [`WaitError::TimedOut`].
pub fn wait_for<F, E>(done: F, timeout: Duration) -> Result<(), WaitError>
where
    F: FnMut() -> Result<bool, E>,
    E: Into<BoxError> + 'static,
{
    wait_every(done, timeout, WAIT_INTERVAL)
}

/// [`wait_for`] with a 10 second timeout.
pub fn wait_for_default<F, E>(done: F) -> Result<(), WaitError>
where
    F: FnMut() -> Result<bool, E>,
    E: Into<BoxError> + 'static,
{
    wait_for(done, DEFAULT_WAIT_TIMEOUT)
}

pub(crate) fn wait_every<F, E>(
    mut done: F,
    timeout: Duration,
    interval: Duration,
) -> Result<(), WaitError>
where
    F: FnMut() -> Result<bool, E>,
    E: Into<BoxError> + 'static,
{
    let budget = RetryBudget::new(timeout);
    let mut last_error: Option<Failure> = None;

    // At least one check, even for a zero timeout.
    loop {
        match done() {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => {
                let failure = classify(e);
                tracing::debug!("wait check failed: {}", failure.chain());
                last_error = Some(failure);
            }
        }
        if budget.expired() {
            break;
        }
        std::thread::sleep(interval.min(budget.remaining()));
    }

    match last_error {
        Some(failure) => Err(WaitError::Failed(failure)),
        None => Err(WaitError::TimedOut(timeout)),
    }
}
