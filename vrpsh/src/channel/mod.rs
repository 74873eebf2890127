//! Channel layer: buffered reads, prompt matching and stream recovery.
//!
//! This module sits between the raw [`transport`](crate::transport) and the
//! [`driver`](crate::driver), adding ANSI stripping, deadlines and
//! prompt-pattern evaluation.

mod buffer;
mod patterns;
mod shell;

pub use buffer::PatternBuffer;
pub use patterns::{PromptSpec, PromptState};
pub use shell::{ChannelConfig, ShellChannel};
