//! Success/error prompt specifications for the command executor.

use regex::bytes::Regex;

/// Terminal state reported by a [`PromptSpec`] evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// The success pattern matched.
    Success,
    /// The error pattern matched.
    Error,
}

/// A compiled pair of patterns evaluated against the cumulative output of a
/// command.
///
/// The success pattern always wins: it is checked first, and the error
/// pattern only when success does not match. A spec without an error pattern
/// can only succeed or time out.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    success: Regex,
    error: Option<Regex>,
}

impl PromptSpec {
    /// Compile a prompt spec from pattern strings.
    pub fn new(success: &str, error: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            success: Regex::new(success)?,
            error: error.map(Regex::new).transpose()?,
        })
    }

    /// Spec that only waits for a success pattern.
    pub fn success_only(success: &str) -> Result<Self, regex::Error> {
        Self::new(success, None)
    }

    /// Evaluate the spec against everything received so far.
    pub fn evaluate(&self, data: &[u8]) -> Option<PromptState> {
        if self.success.is_match(data) {
            return Some(PromptState::Success);
        }
        match self.error {
            Some(ref error) if error.is_match(data) => Some(PromptState::Error),
            _ => None,
        }
    }

    /// Byte offset where the error pattern first matches, if it does.
    pub fn error_start(&self, data: &[u8]) -> Option<usize> {
        self.error.as_ref()?.find(data).map(|m| m.start())
    }

    /// The success pattern.
    pub fn success(&self) -> &Regex {
        &self.success
    }

    /// The error pattern, if any.
    pub fn error(&self) -> Option<&Regex> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privileged_spec() -> PromptSpec {
        PromptSpec::new(r"[\r\n]+\S+\] ?$", Some(r"[\r\n]+\S+> ?$")).unwrap()
    }

    #[test]
    fn test_success_match() {
        let spec = privileged_spec();
        assert_eq!(
            spec.evaluate(b"system-view\r\nEnter system view, return user view with Ctrl+Z.\r\n[HUAWEI]"),
            Some(PromptState::Success)
        );
    }

    #[test]
    fn test_error_match() {
        let spec = privileged_spec();
        assert_eq!(
            spec.evaluate(b"system-view\r\nError: Permission denied\r\n<HUAWEI>"),
            Some(PromptState::Error)
        );
    }

    #[test]
    fn test_pending_when_neither_matches() {
        let spec = privileged_spec();
        assert_eq!(spec.evaluate(b"system-view\r\nEnter system view"), None);
    }

    #[test]
    fn test_success_checked_before_error() {
        let spec = PromptSpec::new(r"done", Some(r"done|failed")).unwrap();
        assert_eq!(spec.evaluate(b"done"), Some(PromptState::Success));
        assert_eq!(spec.evaluate(b"failed"), Some(PromptState::Error));
    }

    #[test]
    fn test_success_only_never_errors() {
        let spec = PromptSpec::success_only(r"[\r\n]+\S+> ?$").unwrap();
        assert_eq!(spec.evaluate(b"return\r\n[HUAWEI]"), None);
        assert_eq!(
            spec.evaluate(b"return\r\n<HUAWEI>"),
            Some(PromptState::Success)
        );
    }

    #[test]
    fn test_error_start() {
        let spec = PromptSpec::new(r"ok", Some(r"Error:.*")).unwrap();
        assert_eq!(spec.error_start(b"abc\nError: bad"), Some(4));
        assert_eq!(spec.error_start(b"abc"), None);
    }
}
