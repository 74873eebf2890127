//! Session driver for one device shell.

use std::time::{Duration, Instant};

use log::{debug, warn};

use super::outcome::{FailureKind, OperationResult};
use super::response::{ExecState, Execution};
use crate::channel::{ChannelConfig, PromptSpec, PromptState, ShellChannel};
use crate::error::Result;
use crate::platform::{Mode, PlatformDefinition};
use crate::transport::ShellTransport;

/// Driver for one device session.
///
/// Owns the transport, the receive buffer, the current [`Mode`] and the
/// configuration-context flag. Every exchange takes `&mut self`, so commands
/// on one session never interleave.
pub struct GenericDriver<T> {
    pub(super) channel: ShellChannel<T>,
    pub(super) platform: PlatformDefinition,
    pub(super) mode: Mode,
    pub(super) config_context: bool,
}

impl<T: ShellTransport> GenericDriver<T> {
    /// Create a driver over an already established shell.
    pub fn new(transport: T, platform: PlatformDefinition, config: ChannelConfig) -> Self {
        let channel = ShellChannel::new(transport, config, platform.send_terminator.clone());
        Self {
            channel,
            mode: platform.default_mode,
            platform,
            config_context: false,
        }
    }

    /// Wait for the first idle prompt, derive the mode from it, then run the
    /// platform's on_open commands.
    pub async fn open(&mut self) -> OperationResult<Mode> {
        OperationResult::settle(self.try_open().await)
    }

    async fn try_open(&mut self) -> Result<OperationResult<Mode>> {
        self.channel.begin().await?;
        let deadline = self.channel.deadline();
        if !self
            .channel
            .read_until_last_line(&self.platform.prompt_pattern, deadline)
            .await?
        {
            return Ok(OperationResult::failed(
                FailureKind::Timeout,
                "no prompt received after connecting",
            ));
        }
        self.channel.finish();
        self.sync_mode();
        debug!("session opened in {} mode", self.mode);

        for command in self.platform.on_open_commands.clone() {
            let execution = self.send_command(&command).await?;
            if execution.state == ExecState::Timeout {
                return Ok(OperationResult::failed(
                    FailureKind::Timeout,
                    format!("no prompt after '{}'", command),
                ));
            }
        }
        Ok(OperationResult::Succeeded(self.mode))
    }

    /// Send a command and classify the output against `prompt`.
    ///
    /// Infrastructure errors are returned as `Err`; a device error or a
    /// timeout is reported through [`Execution::state`].
    pub async fn execute(&mut self, command: &str, prompt: &PromptSpec) -> Result<Execution> {
        let start = Instant::now();
        self.channel.begin().await?;
        self.channel.send_line(command).await?;
        let deadline = self.channel.deadline();
        let matched = self.channel.read_until(prompt, deadline).await?;

        let data = self.channel.buffer().as_slice();
        let content = String::from_utf8_lossy(data).into_owned();
        let (state, error_detail) = match matched {
            Some(PromptState::Success) => (ExecState::Success, None),
            Some(PromptState::Error) => {
                let detail = prompt
                    .error_start(data)
                    .map(|at| String::from_utf8_lossy(&data[at..]).trim().to_string());
                (ExecState::Error, detail)
            }
            None => (ExecState::Timeout, None),
        };

        if state == ExecState::Timeout {
            warn!(
                "'{}' matched neither pattern within {:?}",
                command,
                self.channel.config().timeout
            );
        } else {
            self.channel.finish();
        }
        debug!("'{}' -> {:?}", command, state);

        Ok(Execution {
            command: command.to_string(),
            state,
            content,
            error_detail,
            elapsed: start.elapsed(),
        })
    }

    /// Send a command and wait for any idle prompt.
    ///
    /// Completes in the success state once the final line is a prompt, or in
    /// the timeout state. The mode is re-derived from the prompt.
    pub async fn send_command(&mut self, command: &str) -> Result<Execution> {
        let start = Instant::now();
        self.channel.begin().await?;
        self.channel.send_line(command).await?;
        let deadline = self.channel.deadline();
        let reached = self
            .channel
            .read_until_last_line(&self.platform.prompt_pattern, deadline)
            .await?;

        let state = if reached {
            self.channel.finish();
            self.sync_mode();
            ExecState::Success
        } else {
            warn!("no prompt after '{}'", command);
            ExecState::Timeout
        };

        Ok(Execution {
            command: command.to_string(),
            state,
            content: self.channel.buffer().as_str_lossy().into_owned(),
            error_detail: None,
            elapsed: start.elapsed(),
        })
    }

    /// Set the mode from the prompt on the final line of the buffer.
    ///
    /// Landing in general mode ends any configuration context.
    pub(super) fn sync_mode(&mut self) {
        let prompt = String::from_utf8_lossy(self.channel.buffer().last_line()).into_owned();
        self.set_mode(self.platform.determine_mode(&prompt));
    }

    pub(super) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode <= Mode::GENERAL && self.config_context {
            debug!("configuration context closed in {} mode", mode);
            self.config_context = false;
        }
    }

    /// Close the transport.
    pub async fn close(&mut self) -> Result<()> {
        debug!("closing session");
        self.channel.close().await
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether a save is allowed (see
    /// [`save_configuration`](Self::save_configuration)).
    pub fn in_config_context(&self) -> bool {
        self.config_context
    }

    /// Mark the session as being in (or out of) configuration context.
    pub fn set_config_context(&mut self, active: bool) {
        self.config_context = active;
    }

    /// Get a reference to the platform definition.
    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        self.channel.transport()
    }

    /// Set the exchange timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.channel.set_timeout(timeout);
    }

    /// Unwrap the transport.
    pub fn into_transport(self) -> T {
        self.channel.into_transport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::vendors::huawei;
    use crate::transport::ReplayShell;

    fn driver(shell: ReplayShell) -> GenericDriver<ReplayShell> {
        let config = ChannelConfig {
            timeout: Duration::from_millis(200),
            drain_timeout: Duration::from_millis(20),
            ..ChannelConfig::default()
        };
        GenericDriver::new(shell, huawei::platform(), config)
    }

    #[tokio::test]
    async fn test_open_runs_on_open_commands() {
        let shell = ReplayShell::new()
            .output("\r\nInfo: The max number of VTY users is 5.\r\n<HUAWEI>")
            .input("screen-length 0 temporary")
            .output("screen-length 0 temporary\r\nInfo: The configuration takes effect on the current user terminal interface only.\r\n<HUAWEI>");
        let mut driver = driver(shell);

        let result = driver.open().await;
        assert_eq!(result.payload(), Some(&Mode::GENERAL));
        assert_eq!(driver.transport().sent(), ["screen-length 0 temporary"]);
        assert!(driver.transport().is_exhausted());
    }

    #[tokio::test]
    async fn test_open_in_system_view() {
        let shell = ReplayShell::new()
            .output("[HUAWEI]")
            .input("screen-length 0 temporary")
            .output("screen-length 0 temporary\r\n[HUAWEI]");
        let mut driver = driver(shell);

        assert_eq!(driver.open().await.payload(), Some(&Mode::PRIVILEGED));
        assert_eq!(driver.mode(), Mode::PRIVILEGED);
    }

    #[tokio::test]
    async fn test_open_without_prompt_times_out() {
        let mut driver = driver(ReplayShell::new().output("Login authentication\r\n"));
        let result = driver.open().await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn test_execute_error_detail() {
        let shell = ReplayShell::new().input("display foo").output(
            "display foo\r\n            ^\r\nError: Unrecognized command found at '^' position.\r\n<HUAWEI>",
        );
        let mut driver = driver(shell);
        let prompt = PromptSpec::new(r"foo[\s\S]+bar", Some(r"Error:[\s\S]+> ?$")).unwrap();

        let execution = driver.execute("display foo", &prompt).await.unwrap();
        assert_eq!(execution.state, ExecState::Error);
        assert_eq!(
            execution.error_detail.as_deref(),
            Some("Error: Unrecognized command found at '^' position.\r\n<HUAWEI>")
        );
        assert!(execution.content.starts_with("display foo"));
    }

    #[tokio::test]
    async fn test_execute_timeout_keeps_content() {
        let shell = ReplayShell::new()
            .input("display version")
            .output("display version\r\n");
        let mut driver = driver(shell);
        let prompt = PromptSpec::success_only(r"[sS]oftware").unwrap();

        let execution = driver.execute("display version", &prompt).await.unwrap();
        assert_eq!(execution.state, ExecState::Timeout);
        assert_eq!(execution.content, "display version\r\n");
        assert_eq!(execution.error_detail, None);
    }

    #[tokio::test]
    async fn test_transport_error_is_err() {
        let shell = ReplayShell::new().input("save").output("ok");
        let mut driver = driver(shell);
        let prompt = PromptSpec::success_only(r"ok").unwrap();

        assert!(driver.execute("reboot", &prompt).await.is_err());
    }
}
