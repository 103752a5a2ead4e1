//! Best-effort execution: log a failure and carry on.

use std::future::Future;

use super::classify::classify;
use super::error::BoxError;

/// Run `action`; if it fails, log the failure and discard it.
///
/// For side operations (closing a connection, cleaning up a temp topic) whose
/// failure must never abort the caller.
pub fn swallow<E, F>(action: F)
where
    F: FnOnce() -> Result<(), E>,
    E: Into<BoxError> + 'static,
{
    if let Err(e) = action() {
        report(e);
    }
}

/// Async variant of [`swallow`].
pub async fn swallow_async<E, Fut>(action: Fut)
where
    Fut: Future<Output = Result<(), E>>,
    E: Into<BoxError> + 'static,
{
    if let Err(e) = action.await {
        report(e);
    }
}

fn report<E: Into<BoxError> + 'static>(e: E) {
    let failure = classify(e);
    tracing::warn!(kind = ?failure.kind(), "ignoring failure: {}", failure.chain());
}
