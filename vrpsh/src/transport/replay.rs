//! Scripted transport for exercising a session without a device.
//!
//! A script is a sequence of steps: wait for a line of input, then emit
//! output. Output behind an unanswered input step is withheld, so a caller
//! that never sends the expected line simply sees silence.

use std::collections::VecDeque;
use std::time::Duration;

use log::trace;

use super::ShellTransport;
use crate::error::{Result, TransportError};

#[derive(Debug, Clone)]
enum ReplayStep {
    /// Block output until this line is sent.
    Input(String),
    /// Bytes handed out by `receive_chunk`.
    Output(Vec<u8>),
}

/// Scripted [`ShellTransport`] that records everything sent to it.
///
/// # Example
///
/// ```rust
/// use vrpsh::transport::ReplayShell;
///
/// let shell = ReplayShell::new()
///     .output("<HUAWEI>")
///     .input("display version")
///     .output("display version\r\nVRP (R) software, Version 5.160\r\n<HUAWEI>");
/// assert!(shell.sent().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ReplayShell {
    steps: VecDeque<ReplayStep>,
    unmatched: VecDeque<String>,
    sent: Vec<String>,
    idle_delay: Duration,
    closed: bool,
}

impl ReplayShell {
    /// Create an empty script.
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            unmatched: VecDeque::new(),
            sent: Vec::new(),
            idle_delay: Duration::from_millis(5),
            closed: false,
        }
    }

    /// Wait for `line` to be sent before emitting anything further.
    pub fn input(mut self, line: impl Into<String>) -> Self {
        self.steps.push_back(ReplayStep::Input(line.into()));
        self
    }

    /// Emit `text` as device output.
    pub fn output(mut self, text: impl AsRef<[u8]>) -> Self {
        self.steps
            .push_back(ReplayStep::Output(text.as_ref().to_vec()));
        self
    }

    /// How long an empty read sleeps, standing in for a read timeout.
    pub fn with_idle_delay(mut self, idle_delay: Duration) -> Self {
        self.idle_delay = idle_delay;
        self
    }

    /// Every line sent so far, terminator removed, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Whether all scripted steps have been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether `close` was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for ReplayShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellTransport for ReplayShell {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.closed {
            return Err(TransportError::Disconnected.into());
        }
        let text = String::from_utf8_lossy(data);
        for line in text.split_inclusive('\n') {
            let line = line.trim_end_matches(['\r', '\n']).to_string();
            trace!("replay received input {:?}", line);
            self.sent.push(line.clone());
            self.unmatched.push_back(line);
        }
        Ok(())
    }

    async fn receive_chunk(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        if self.closed {
            return Err(TransportError::Disconnected.into());
        }

        loop {
            match self.steps.front_mut() {
                Some(ReplayStep::Input(expected)) => {
                    let Some(actual) = self.unmatched.pop_front() else {
                        break;
                    };
                    if actual != *expected {
                        return Err(TransportError::ReplayMismatch {
                            expected: expected.clone(),
                            actual,
                        }
                        .into());
                    }
                    self.steps.pop_front();
                }
                Some(ReplayStep::Output(data)) => {
                    let n = data.len().min(max_bytes);
                    let chunk: Vec<u8> = data.drain(..n).collect();
                    if data.is_empty() {
                        self.steps.pop_front();
                    }
                    return Ok(chunk);
                }
                None => break,
            }
        }

        tokio::time::sleep(self.idle_delay).await;
        Ok(Vec::new())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_output_gated_on_input() {
        let mut shell = ReplayShell::new()
            .input("display vlan")
            .output("VID  Status");

        assert!(shell.receive_chunk(64).await.unwrap().is_empty());

        shell.send(b"display vlan\n").await.unwrap();
        assert_eq!(shell.receive_chunk(64).await.unwrap(), b"VID  Status");
        assert!(shell.is_exhausted());
    }

    #[tokio::test]
    async fn test_output_split_by_max_bytes() {
        let mut shell = ReplayShell::new().output("<HUAWEI>");
        assert_eq!(shell.receive_chunk(3).await.unwrap(), b"<HU");
        assert_eq!(shell.receive_chunk(64).await.unwrap(), b"AWEI>");
        assert!(shell.receive_chunk(64).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_input_is_reported() {
        let mut shell = ReplayShell::new().input("save").output("ok");
        shell.send(b"reboot\n").await.unwrap();

        let err = shell.receive_chunk(64).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::ReplayMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_sent_lines_recorded_without_terminator() {
        let mut shell = ReplayShell::new();
        shell.send(b"return\r\n").await.unwrap();
        shell.send(b"Y\n").await.unwrap();
        assert_eq!(shell.sent(), ["return", "Y"]);
    }
}
