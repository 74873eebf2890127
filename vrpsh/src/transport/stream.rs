//! Transport over any async byte stream.
//!
//! Covers telnet-style console servers (`TcpStream`), serial bridges and
//! in-memory mocks.

use log::trace;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::ShellTransport;
use super::config::StreamConfig;
use crate::error::{Result, TransportError};

/// Shell transport wrapping an `AsyncRead + AsyncWrite` stream.
#[derive(Debug)]
pub struct StreamShell<S> {
    stream: S,
    config: StreamConfig,
}

impl<S> StreamShell<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap a connected stream.
    pub fn new(stream: S, config: StreamConfig) -> Self {
        Self { stream, config }
    }

    /// Wrap a connected stream with default settings.
    pub fn with_defaults(stream: S) -> Self {
        Self::new(stream, StreamConfig::default())
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> ShellTransport for StreamShell<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .await
            .map_err(TransportError::Io)?;
        self.stream.flush().await.map_err(TransportError::Io)?;
        Ok(())
    }

    async fn receive_chunk(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let mut chunk = vec![0u8; max_bytes];
        let read = tokio::time::timeout(self.config.read_timeout, self.stream.read(&mut chunk)).await;

        match read {
            Err(_) => Ok(Vec::new()),
            Ok(Ok(0)) => Err(TransportError::Disconnected.into()),
            Ok(Ok(n)) => {
                trace!("stream read {} bytes", n);
                chunk.truncate(n);
                Ok(chunk)
            }
            Ok(Err(e)) => Err(TransportError::Io(e).into()),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.stream.shutdown().await.map_err(TransportError::Io)?;
        Ok(())
    }
}
