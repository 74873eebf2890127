//! Builder for creating device drivers.

use std::time::Duration;

use super::generic::GenericDriver;
use crate::channel::ChannelConfig;
use crate::error::{DriverError, Result};
use crate::platform::{PlatformDefinition, PlatformRegistry};
use crate::transport::ShellTransport;

/// Builder for constructing device drivers.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use vrpsh::driver::DriverBuilder;
/// use vrpsh::transport::ReplayShell;
///
/// # fn main() -> Result<(), vrpsh::Error> {
/// let driver = DriverBuilder::new()
///     .platform("huawei_vrp")
///     .timeout(Duration::from_secs(10))
///     .build(ReplayShell::new())?;
/// assert_eq!(driver.platform().name, "huawei_vrp");
/// # Ok(())
/// # }
/// ```
pub struct DriverBuilder {
    platform_name: Option<String>,
    custom_platform: Option<PlatformDefinition>,
    config: ChannelConfig,
    line_terminator: Option<String>,
}

impl DriverBuilder {
    /// Create a new driver builder with default channel settings.
    pub fn new() -> Self {
        Self {
            platform_name: None,
            custom_platform: None,
            config: ChannelConfig::default(),
            line_terminator: None,
        }
    }

    /// Set the platform name (e.g., "huawei_vrp").
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform_name = Some(platform.into());
        self
    }

    /// Set a custom platform definition.
    pub fn custom_platform(mut self, platform: PlatformDefinition) -> Self {
        self.custom_platform = Some(platform);
        self
    }

    /// Set the per-exchange timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum bytes per read.
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.config.read_chunk_size = size;
        self
    }

    /// Set the quiet period that ends a drain of stale output.
    pub fn drain_timeout(mut self, timeout: Duration) -> Self {
        self.config.drain_timeout = timeout;
        self
    }

    /// Override the platform's output line terminator.
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = Some(terminator.into());
        self
    }

    /// Build a driver over an established shell transport.
    ///
    /// The driver is not opened; call
    /// [`open`](GenericDriver::open) before the first operation.
    pub fn build<T: ShellTransport>(self, transport: T) -> Result<GenericDriver<T>> {
        if self.config.timeout.is_zero() {
            return Err(DriverError::InvalidConfig {
                message: "timeout must be non-zero".to_string(),
            }
            .into());
        }
        if self.config.read_chunk_size == 0 {
            return Err(DriverError::InvalidConfig {
                message: "read_chunk_size must be non-zero".to_string(),
            }
            .into());
        }

        let mut platform = if let Some(custom) = self.custom_platform {
            custom
        } else if let Some(name) = self.platform_name {
            PlatformRegistry::lookup(&name)?
        } else {
            return Err(DriverError::InvalidConfig {
                message: "Platform must be specified".to_string(),
            }
            .into());
        };

        if let Some(terminator) = self.line_terminator {
            if terminator.is_empty() {
                return Err(DriverError::InvalidConfig {
                    message: "line terminator must not be empty".to_string(),
                }
                .into());
            }
            platform.line_terminator = terminator;
        }

        Ok(GenericDriver::new(transport, platform, self.config))
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
