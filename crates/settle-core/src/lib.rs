pub mod budget;
pub mod config;
pub mod failure;
pub mod logging;
pub mod poll;

pub use budget::RetryBudget;
pub use failure::{classify, Failure, FailureKind};
pub use poll::{poll, Poller};
