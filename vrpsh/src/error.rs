//! Error types for vrpsh.
//!
//! These are infrastructure errors: a broken transport, a bad driver
//! configuration or an unknown platform. Expected device-side failures such as a rejected
//! command or a refused mode change are reported through
//! [`OperationResult`](crate::driver::OperationResult) instead.

use std::io;

use thiserror::Error;

/// Main error type for vrpsh operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Platform/vendor errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Transport layer errors (byte stream I/O).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH protocol error on the session channel
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// The remote side closed the stream
    #[error("Connection disconnected")]
    Disconnected,

    /// Scripted replay received input it was not expecting
    #[error("Replay mismatch: expected input '{expected}', got '{actual}'")]
    ReplayMismatch { expected: String, actual: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Driver layer errors.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The platform has no command registered for a category
    #[error("Platform '{platform}' has no command for {category}")]
    MissingCommand { platform: String, category: String },
}

/// Platform/vendor definition errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Unknown platform name
    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    /// Platform already registered
    #[error("Platform already registered: {name}")]
    AlreadyRegistered { name: String },
}

/// Result type alias using vrpsh's Error.
pub type Result<T> = std::result::Result<T, Error>;
