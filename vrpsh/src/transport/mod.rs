//! Byte-stream transports for the device shell.
//!
//! A transport only moves bytes. Prompt detection, buffering and timeouts
//! live in the [`channel`](crate::channel) layer, and establishing the
//! underlying session (login, SSH handshake) is the caller's job.

pub mod config;
mod replay;
mod ssh;
mod stream;

use std::future::Future;

pub use config::StreamConfig;
pub use replay::ReplayShell;
pub use ssh::SshShell;
pub use stream::StreamShell;

use crate::error::Result;

/// An open, interactive shell channel to one device.
pub trait ShellTransport: Send {
    /// Write raw bytes to the shell.
    fn send(&mut self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Read at most `max_bytes` of output.
    ///
    /// Returns an empty vector when nothing arrived within the transport's
    /// own read timeout. A closed stream is an error, not an empty read.
    fn receive_chunk(&mut self, max_bytes: usize) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Release the channel.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}
