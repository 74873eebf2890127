//! Transport over an SSH session channel using russh.
//!
//! The SSH session, authentication and the PTY/shell requests are set up by
//! the caller; this type only drives the resulting channel.

use bytes::{Buf, BytesMut};
use log::{debug, trace};
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::ShellTransport;
use super::config::StreamConfig;
use crate::error::{Result, TransportError};

/// Shell transport wrapping an interactive russh channel.
///
/// SSH delivers output in packets that may exceed the requested chunk size;
/// the remainder is held back and returned by the next read.
pub struct SshShell {
    channel: Channel<Msg>,
    pending: BytesMut,
    config: StreamConfig,
    closed: bool,
}

impl SshShell {
    /// Wrap a channel on which a shell has already been requested.
    pub fn new(channel: Channel<Msg>, config: StreamConfig) -> Self {
        Self {
            channel,
            pending: BytesMut::with_capacity(4096),
            config,
            closed: false,
        }
    }

    /// Move up to `max_bytes` of held-back output into a chunk.
    fn take_pending(&mut self, max_bytes: usize) -> Vec<u8> {
        let n = self.pending.len().min(max_bytes);
        let chunk = self.pending[..n].to_vec();
        self.pending.advance(n);
        chunk
    }
}

impl ShellTransport for SshShell {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.closed {
            return Err(TransportError::Disconnected.into());
        }
        self.channel
            .data(data)
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }

    async fn receive_chunk(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        if !self.pending.is_empty() {
            return Ok(self.take_pending(max_bytes));
        }
        if self.closed {
            return Err(TransportError::Disconnected.into());
        }

        let deadline = tokio::time::Instant::now() + self.config.read_timeout;
        loop {
            let msg = match tokio::time::timeout_at(deadline, self.channel.wait()).await {
                Err(_) => return Ok(Vec::new()),
                Ok(msg) => msg,
            };

            match msg {
                Some(ChannelMsg::Data { ref data }) => {
                    trace!("ssh channel data: {} bytes", data.len());
                    self.pending.extend_from_slice(&data[..]);
                    return Ok(self.take_pending(max_bytes));
                }
                Some(ChannelMsg::ExtendedData { ref data, .. }) => {
                    self.pending.extend_from_slice(&data[..]);
                    return Ok(self.take_pending(max_bytes));
                }
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    debug!("ssh channel closed by peer");
                    self.closed = true;
                    return Err(TransportError::Disconnected.into());
                }
                Some(_) => continue,
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.channel.close().await.map_err(TransportError::Ssh)?;
        }
        Ok(())
    }
}
