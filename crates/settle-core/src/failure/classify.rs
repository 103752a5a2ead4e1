//! Map raw errors onto the [`Failure`] taxonomy.

use std::any::Any;
use std::error::Error as StdError;
use std::io;

use tokio::task::JoinError;

use super::error::{BoxError, DomainError, ExecutionError, Failure, InstanceNotFound};

/// Classify a raw error. First match wins:
///
/// 1. `std::io::Error` -> [`Failure::Io`]
/// 2. [`InstanceNotFound`] -> [`Failure::NotFound`]
/// 3. [`Failure`] is returned as-is; [`DomainError`] -> [`Failure::Domain`]
/// 4. [`ExecutionError`] -> [`Failure::Execution`] holding the wrapped cause;
///    a tokio `JoinError` -> [`Failure::Execution`] holding the join error
/// 5. anything else -> [`Failure::Unknown`]
///
/// An `anyhow::Error` is matched by the error it was built from (or wraps
/// with context), not by the `anyhow` wrapper.
///
/// `Failure::Unknown::type_name` is the static type of `raw`; for an
/// already-boxed error that is the box type, not the concrete error.
///
/// Never logs and never drops the original error.
pub fn classify<E>(raw: E) -> Failure
where
    E: Into<BoxError> + 'static,
{
    let type_name = std::any::type_name::<E>();
    let raw = Raw::new(raw);

    let raw = match raw.take::<io::Error>() {
        Ok(e) => return Failure::Io(e),
        Err(raw) => raw,
    };
    let raw = match raw.take::<InstanceNotFound>() {
        Ok(e) => return Failure::NotFound(e),
        Err(raw) => raw,
    };
    let raw = match raw.take::<Failure>() {
        Ok(f) => return f,
        Err(raw) => raw,
    };
    let raw = match raw.take::<DomainError>() {
        Ok(e) => return Failure::Domain(e),
        Err(raw) => raw,
    };
    let raw = match raw.take::<ExecutionError>() {
        Ok(e) => return Failure::Execution(e.into_inner()),
        Err(raw) => raw,
    };
    let raw = match raw.take::<JoinError>() {
        Ok(e) => return Failure::Execution(Box::new(e)),
        Err(raw) => raw,
    };

    Failure::Unknown {
        type_name,
        source: raw.into_boxed(),
    }
}

/// A raw error, either boxed or still inside `anyhow`.
///
/// `anyhow` boxes into its own wrapper type, so its errors have to be
/// downcast through `anyhow::Error::downcast` to reach the original.
enum Raw {
    Boxed(BoxError),
    Anyhow(anyhow::Error),
}

impl Raw {
    fn new<E>(raw: E) -> Self
    where
        E: Into<BoxError> + 'static,
    {
        let mut slot = Some(raw);
        if let Some(err) = (&mut slot as &mut dyn Any)
            .downcast_mut::<Option<anyhow::Error>>()
            .and_then(Option::take)
        {
            return Raw::Anyhow(err);
        }
        match slot {
            Some(raw) => Raw::Boxed(raw.into()),
            None => unreachable!("slot is only emptied for anyhow errors"),
        }
    }

    fn take<T>(self) -> Result<T, Raw>
    where
        T: StdError + Send + Sync + 'static,
    {
        match self {
            Raw::Boxed(b) => b.downcast::<T>().map(|e| *e).map_err(Raw::Boxed),
            Raw::Anyhow(a) => a.downcast::<T>().map_err(Raw::Anyhow),
        }
    }

    fn into_boxed(self) -> BoxError {
        match self {
            Raw::Boxed(b) => b,
            Raw::Anyhow(a) => a.into(),
        }
    }
}

/// Run a fallible getter and classify its error, so callers see only [`Failure`].
pub fn pack<T, E, F>(getter: F) -> Result<T, Failure>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError> + 'static,
{
    getter().map_err(classify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureKind;
    use anyhow::Context;
    use std::fmt;

    #[derive(Debug)]
    struct Custom;

    impl fmt::Display for Custom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "custom")
        }
    }

    impl StdError for Custom {}

    #[test]
    fn io_error_is_io() {
        let f = classify(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        match f {
            Failure::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn io_wins_even_for_not_found_kind() {
        let f = classify(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(f.kind(), FailureKind::Io);
    }

    #[test]
    fn lookup_failure_is_not_found_with_original_cause() {
        let f = classify(InstanceNotFound::new("kafka.server:type=BrokerTopicMetrics"));
        assert_eq!(f.kind(), FailureKind::NotFound);
        let cause = f.source().unwrap().downcast_ref::<InstanceNotFound>().unwrap();
        assert_eq!(cause.name(), "kafka.server:type=BrokerTopicMetrics");
    }

    #[test]
    fn failure_passes_through_without_double_wrapping() {
        let original = Failure::NotFound(InstanceNotFound::new("broker-1"));
        let f = classify(original);
        match f {
            Failure::NotFound(e) => assert_eq!(e.name(), "broker-1"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn domain_error_passes_through() {
        let f = classify(DomainError::new("partition count must be positive"));
        match &f {
            Failure::Domain(e) => assert_eq!(e.message(), "partition count must be positive"),
            other => panic!("expected Domain, got {other:?}"),
        }
    }

    #[test]
    fn execution_error_unwraps_one_level() {
        let inner = DomainError::new("leader not available");
        let f = classify(ExecutionError::new(inner));
        assert_eq!(f.kind(), FailureKind::Execution);
        let cause = f.source().unwrap();
        assert!(cause.downcast_ref::<ExecutionError>().is_none());
        let inner = cause.downcast_ref::<DomainError>().unwrap();
        assert_eq!(inner.message(), "leader not available");
    }

    #[test]
    fn execution_error_keeps_io_inner_as_execution() {
        let inner = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        let f = classify(ExecutionError::new(inner));
        assert_eq!(f.kind(), FailureKind::Execution);
        assert!(f.source().unwrap().downcast_ref::<io::Error>().is_some());
    }

    #[tokio::test]
    async fn join_error_is_execution() {
        let handle = tokio::spawn(async { panic!("task blew up") });
        let join_err = handle.await.unwrap_err();
        let f = classify(join_err);
        assert_eq!(f.kind(), FailureKind::Execution);
        assert!(f.source().unwrap().downcast_ref::<JoinError>().is_some());
    }

    #[test]
    fn anything_else_is_unknown_and_keeps_type_and_cause() {
        let f = classify(Custom);
        match &f {
            Failure::Unknown { type_name, source } => {
                assert!(type_name.ends_with("Custom"), "type_name = {type_name}");
                assert!(source.downcast_ref::<Custom>().is_some());
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
        let expected = format!("unknown failure ({}): custom", std::any::type_name::<Custom>());
        assert_eq!(f.chain(), expected);
    }

    #[test]
    fn string_errors_are_unknown() {
        let f = classify("metadata request rejected");
        assert_eq!(f.kind(), FailureKind::Unknown);
        assert!(f.chain().ends_with("metadata request rejected"));
    }

    #[test]
    fn anyhow_wrapped_io_error_is_io() {
        let err = anyhow::Error::new(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        match classify(err) {
            Failure::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn anyhow_wrapped_lookup_failure_is_not_found() {
        let err = anyhow::Error::new(InstanceNotFound::new("broker-4"));
        match classify(err) {
            Failure::NotFound(e) => assert_eq!(e.name(), "broker-4"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn anyhow_context_still_reaches_io_error() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::TimedOut, "slow"))
            .context("describe cluster")
            .unwrap_err();
        assert_eq!(classify(err).kind(), FailureKind::Io);
    }

    #[test]
    fn anyhow_message_is_unknown_and_keeps_text() {
        let f = classify(anyhow::anyhow!("quorum lost"));
        match &f {
            Failure::Unknown { type_name, .. } => assert_eq!(*type_name, "anyhow::Error"),
            other => panic!("expected Unknown, got {other:?}"),
        }
        assert!(f.chain().ends_with("quorum lost"));
    }

    #[test]
    fn boxed_error_records_box_type_name() {
        let boxed: BoxError = Box::new(Custom);
        match classify(boxed) {
            Failure::Unknown { type_name, source } => {
                assert!(type_name.contains("Box<dyn"), "type_name = {type_name}");
                assert!(source.downcast_ref::<Custom>().is_some());
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn execution_chain_names_inner_cause_once() {
        let err = DomainError::new("outer").with_source(ExecutionError::new(DomainError::new("x")));
        let f = classify(err);
        assert_eq!(f.chain(), "domain failure: outer: execution failed: x");
    }

    #[test]
    fn pack_passes_values_and_classifies_errors() {
        assert_eq!(pack(|| Ok::<_, io::Error>(7)).unwrap(), 7);
        let err = pack(|| Err::<(), _>(InstanceNotFound::new("topic-a"))).unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }
}
