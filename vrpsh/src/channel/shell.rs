//! Buffered shell channel with deadlines and dirty-stream recovery.

use std::time::Duration;

use log::{debug, trace, warn};
use regex::bytes::Regex;
use tokio::time::Instant;

use super::buffer::PatternBuffer;
use super::patterns::{PromptSpec, PromptState};
use crate::error::Result;
use crate::transport::ShellTransport;

/// Configuration for channel behavior.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Upper bound for one command/response exchange.
    pub timeout: Duration,

    /// Maximum bytes requested from the transport per read.
    pub read_chunk_size: usize,

    /// Quiet period that ends a drain of stale output.
    pub drain_timeout: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            read_chunk_size: 1024,
            drain_timeout: Duration::from_millis(250),
        }
    }
}

/// A transport plus the receive buffer shared by every exchange on it.
///
/// An exchange is bracketed by [`begin`](Self::begin) and
/// [`finish`](Self::finish). If an exchange times out, or its future is
/// dropped before `finish`, the channel stays dirty and the next `begin`
/// drains whatever the device is still sending.
pub struct ShellChannel<T> {
    transport: T,
    config: ChannelConfig,
    buffer: PatternBuffer,
    send_terminator: String,
    dirty: bool,
}

impl<T: ShellTransport> ShellChannel<T> {
    /// Create a channel over `transport`; `send_terminator` ends every line sent.
    pub fn new(transport: T, config: ChannelConfig, send_terminator: impl Into<String>) -> Self {
        Self {
            buffer: PatternBuffer::new(),
            transport,
            config,
            send_terminator: send_terminator.into(),
            dirty: false,
        }
    }

    /// Write `text` followed by the line terminator.
    pub async fn send_line(&mut self, text: &str) -> Result<()> {
        let mut line = String::with_capacity(text.len() + self.send_terminator.len());
        line.push_str(text);
        line.push_str(&self.send_terminator);
        trace!("send {:?}", line);
        self.transport.send(line.as_bytes()).await
    }

    /// Start an exchange: recover a dirty stream and clear the buffer.
    pub async fn begin(&mut self) -> Result<()> {
        if self.dirty {
            self.drain().await?;
        }
        self.buffer.clear();
        self.dirty = true;
        Ok(())
    }

    /// Mark the current exchange as complete.
    pub fn finish(&mut self) {
        self.dirty = false;
    }

    /// Deadline for an exchange starting now.
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.config.timeout
    }

    /// Read one chunk into the buffer.
    ///
    /// Returns `Ok(false)` once `deadline` has passed. An empty read (the
    /// transport's own timeout) counts as progress and returns `Ok(true)`.
    pub async fn read_chunk(&mut self, deadline: Instant) -> Result<bool> {
        if Instant::now() >= deadline {
            return Ok(false);
        }
        let read = tokio::time::timeout_at(
            deadline,
            self.transport.receive_chunk(self.config.read_chunk_size),
        )
        .await;

        match read {
            Err(_) => Ok(false),
            Ok(chunk) => {
                let chunk = chunk?;
                if !chunk.is_empty() {
                    self.buffer.extend(&chunk);
                }
                Ok(true)
            }
        }
    }

    /// Read until `spec` reaches a terminal state, or `None` at the deadline.
    pub async fn read_until(
        &mut self,
        spec: &PromptSpec,
        deadline: Instant,
    ) -> Result<Option<PromptState>> {
        loop {
            if !self.read_chunk(deadline).await? {
                return Ok(None);
            }
            if let Some(state) = spec.evaluate(self.buffer.as_slice()) {
                return Ok(Some(state));
            }
        }
    }

    /// Read until the final line matches `pattern`; `false` at the deadline.
    pub async fn read_until_last_line(&mut self, pattern: &Regex, deadline: Instant) -> Result<bool> {
        loop {
            if self.buffer.last_line_matches(pattern) {
                return Ok(true);
            }
            if !self.read_chunk(deadline).await? {
                return Ok(false);
            }
        }
    }

    /// Discard output until the stream stays quiet for the drain timeout.
    ///
    /// A device that never goes quiet is given up on after the exchange
    /// timeout.
    pub async fn drain(&mut self) -> Result<()> {
        debug!("draining stale output before next exchange");
        let deadline = self.deadline();
        loop {
            let now = Instant::now();
            if now >= deadline {
                warn!(
                    "output still arriving after {:?}, ending drain",
                    self.config.timeout
                );
                break;
            }
            let quiet = (now + self.config.drain_timeout).min(deadline);
            let read = tokio::time::timeout_at(
                quiet,
                self.transport.receive_chunk(self.config.read_chunk_size),
            )
            .await;
            match read {
                Err(_) => break,
                Ok(chunk) => {
                    let chunk = chunk?;
                    if chunk.is_empty() {
                        break;
                    }
                    trace!("drained {} bytes", chunk.len());
                }
            }
        }
        self.buffer.clear();
        self.dirty = false;
        Ok(())
    }

    /// Whether a previous exchange was left unfinished.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &PatternBuffer {
        &self.buffer
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Set the exchange timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Close the transport.
    pub async fn close(&mut self) -> Result<()> {
        self.transport.close().await
    }

    /// Unwrap the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
