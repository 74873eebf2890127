//! Tri-state result of a driver operation.

use std::fmt;

use super::response::Execution;
use crate::error::{Error, Result};

/// Why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A mode change was refused or a prerequisite transition failed.
    Transition,
    /// The session was not in the state the operation requires.
    Precondition,
    /// The device answered with its error pattern.
    CommandRejected,
    /// No terminal pattern before the deadline.
    Timeout,
    /// The transport or channel broke underneath the exchange.
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Transition => "transition",
            FailureKind::Precondition => "precondition",
            FailureKind::CommandRejected => "command rejected",
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
        };
        f.write_str(name)
    }
}

/// A failed operation: the kind and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

impl Failure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::Transport(_) => FailureKind::Transport,
            Error::Driver(_) | Error::Platform(_) => FailureKind::Precondition,
        };
        Failure::new(kind, err.to_string())
    }
}

/// Outcome of a driver operation.
///
/// `Unresolved` carries an exchange that neither succeeded nor failed
/// recognisably (no pattern matched before the deadline) and is passed
/// through for the caller to inspect.
#[derive(Debug, Clone)]
#[must_use]
pub enum OperationResult<T> {
    Succeeded(T),
    Failed(Failure),
    Unresolved(Execution),
}

impl<T> OperationResult<T> {
    /// Shorthand for a failure.
    pub fn failed(kind: FailureKind, detail: impl Into<String>) -> Self {
        OperationResult::Failed(Failure::new(kind, detail))
    }

    /// Fold an infrastructure error into the result.
    pub(crate) fn settle(result: Result<Self>) -> Self {
        result.unwrap_or_else(|err| OperationResult::Failed(Failure::from(err)))
    }

    /// Check if the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Succeeded(_))
    }

    /// The payload of a successful operation.
    pub fn payload(&self) -> Option<&T> {
        match self {
            OperationResult::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the result, keeping only the payload.
    pub fn into_payload(self) -> Option<T> {
        match self {
            OperationResult::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Detail of a failed or unresolved operation; `None` on success.
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            OperationResult::Succeeded(_) => None,
            OperationResult::Failed(failure) => Some(&failure.detail),
            OperationResult::Unresolved(execution) => Some(execution.diagnostic()),
        }
    }

    /// Kind of a failed operation.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            OperationResult::Failed(failure) => Some(failure.kind),
            _ => None,
        }
    }

    /// Map the payload of a successful operation.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self {
            OperationResult::Succeeded(value) => OperationResult::Succeeded(f(value)),
            OperationResult::Failed(failure) => OperationResult::Failed(failure),
            OperationResult::Unresolved(execution) => OperationResult::Unresolved(execution),
        }
    }
}

impl<T> From<Error> for OperationResult<T> {
    fn from(err: Error) -> Self {
        OperationResult::Failed(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::driver::ExecState;
    use crate::error::{PlatformError, TransportError};

    #[test]
    fn test_success_has_no_detail() {
        let result = OperationResult::Succeeded(vec!["10.0.0.1".to_string()]);
        assert!(result.is_success());
        assert_eq!(result.error_detail(), None);
        assert_eq!(result.failure_kind(), None);
        assert_eq!(result.payload().map(Vec::len), Some(1));
    }

    #[test]
    fn test_failure_has_no_payload() {
        let result: OperationResult<()> =
            OperationResult::failed(FailureKind::Precondition, "not in configuration mode");
        assert!(!result.is_success());
        assert!(result.payload().is_none());
        assert_eq!(result.error_detail(), Some("not in configuration mode"));
        assert_eq!(result.failure_kind(), Some(FailureKind::Precondition));
    }

    #[test]
    fn test_unresolved_detail_is_content() {
        let execution = Execution {
            command: "system-view".to_string(),
            state: ExecState::Timeout,
            content: "system-view\r\n".to_string(),
            error_detail: None,
            elapsed: Duration::from_secs(1),
        };
        let result: OperationResult<()> = OperationResult::Unresolved(execution);
        assert!(!result.is_success());
        assert_eq!(result.failure_kind(), None);
        assert_eq!(result.error_detail(), Some("system-view\r\n"));
    }

    #[test]
    fn test_error_mapping() {
        let unknown = Failure::from(Error::from(PlatformError::UnknownPlatform {
            name: "cisco_ios".to_string(),
        }));
        assert_eq!(unknown.kind, FailureKind::Precondition);

        let gone = Failure::from(Error::from(TransportError::Disconnected));
        assert_eq!(gone.kind, FailureKind::Transport);
        assert!(gone.detail.contains("disconnected"));
    }

    #[test]
    fn test_map() {
        let result = OperationResult::Succeeded(2).map(|n| n * 2);
        assert_eq!(result.into_payload(), Some(4));
    }
}
