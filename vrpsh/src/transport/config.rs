//! Transport configuration.

use std::time::Duration;

/// Configuration for [`StreamShell`](super::StreamShell) and
/// [`SshShell`](super::SshShell).
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// How long a single read waits before reporting "no data".
    pub read_timeout: Duration,
}

impl StreamConfig {
    /// Set the per-read timeout.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(500),
        }
    }
}
