//! Failure normalization.
//!
//! Raw errors coming out of predicates and collaborators (I/O, lookups,
//! spawned tasks, application errors) are folded into the closed
//! [`Failure`] enum at the boundary where they become caller-visible. The
//! original error always stays reachable through `source()`.

mod classify;
mod error;
mod swallow;

pub use classify::{classify, pack};
pub use error::{BoxError, DomainError, ExecutionError, Failure, FailureKind, InstanceNotFound};
pub use swallow::{swallow, swallow_async};
