//! Result of one command/response exchange.

use std::fmt;
use std::time::Duration;

/// Terminal state of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    /// The success pattern matched.
    Success,
    /// The error pattern matched.
    Error,
    /// Neither pattern matched before the deadline.
    Timeout,
}

/// Output of a command sent through the executor.
#[derive(Debug, Clone)]
pub struct Execution {
    /// The command that was sent.
    pub command: String,

    /// How the exchange ended.
    pub state: ExecState,

    /// Everything received, including the echo and the final prompt.
    pub content: String,

    /// Text from the start of the error match to the end of the output,
    /// trimmed; present only in the error state.
    pub error_detail: Option<String>,

    /// Time taken by the exchange.
    pub elapsed: Duration,
}

impl Execution {
    /// Check if the success pattern matched.
    pub fn is_success(&self) -> bool {
        self.state == ExecState::Success
    }

    /// Get the content lines as an iterator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    /// Diagnostic text for a failure report: the error detail when there is
    /// one, otherwise the raw content.
    pub fn diagnostic(&self) -> &str {
        self.error_detail.as_deref().unwrap_or(&self.content)
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}
