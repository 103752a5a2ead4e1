//! Debounced polling of eventually-consistent state.
//!
//! [`poll`] / [`Poller`] drive an async predicate on the current task: one
//! evaluation at a time, a fixed pause in between, one shrinking time
//! budget for the whole chain. Independent polls share no state.
//! [`wait_for`] is the blocking, error-tolerant counterpart for callers
//! without a runtime.

mod run;
mod step;
mod wait;

pub use run::{poll, Poller, PAUSE_INTERVAL};
pub use step::Step;
pub use wait::{wait_for, wait_for_default, WaitError, DEFAULT_WAIT_TIMEOUT, WAIT_INTERVAL};
