//! Normalized failure taxonomy and the raw error types the classifier recognizes.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Boxed, thread-safe error used as the cause of a normalized failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Tag of a [`Failure`] variant, for callers that only need to branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Io,
    NotFound,
    Execution,
    Domain,
    Unknown,
}

/// Caller-visible failure. Every variant keeps the original error reachable
/// through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Socket, file or process I/O failed.
    #[error("i/o failure")]
    Io(#[source] io::Error),
    /// A looked-up instance (metric, broker, partition, ...) does not exist.
    #[error("lookup failed")]
    NotFound(#[source] InstanceNotFound),
    /// An asynchronous unit of work failed. Holds the underlying cause, not the wrapper.
    #[error("asynchronous execution failed")]
    Execution(#[source] BoxError),
    /// Already a caller-visible error; carried through unchanged.
    #[error("domain failure")]
    Domain(#[source] DomainError),
    /// Anything the classifier has no category for.
    #[error("unknown failure ({type_name})")]
    Unknown {
        /// Static type of the value handed to the classifier (the box type for boxed errors).
        type_name: &'static str,
        #[source]
        source: BoxError,
    },
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Io(_) => FailureKind::Io,
            Failure::NotFound(_) => FailureKind::NotFound,
            Failure::Execution(_) => FailureKind::Execution,
            Failure::Domain(_) => FailureKind::Domain,
            Failure::Unknown { .. } => FailureKind::Unknown,
        }
    }

    /// Render this failure followed by every cause, joined with `": "`.
    ///
    /// Used for log lines where only a single string fits; the structured
    /// chain stays available through `source()`.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            out.push_str(": ");
            out.push_str(&err.to_string());
            cause = err.source();
        }
        out
    }
}

/// Raised by collaborators when a named instance cannot be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceNotFound {
    name: String,
}

impl InstanceNotFound {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InstanceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance not found: {}", self.name)
    }
}

impl StdError for InstanceNotFound {}

/// Application-level error that is already meaningful to callers.
#[derive(Debug)]
pub struct DomainError {
    message: String,
    source: Option<BoxError>,
}

impl DomainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the lower-level error that caused this one.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Completion wrapper: the asynchronous unit of work failed with `source`.
///
/// The classifier unwraps exactly one level, so the resulting
/// [`Failure::Execution`] points at the real cause.
#[derive(Debug)]
pub struct ExecutionError {
    source: BoxError,
}

impl ExecutionError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("execution failed")
    }
}

impl StdError for ExecutionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source as &(dyn StdError + 'static))
    }
}
