//! Mode transitions between general, privileged and nested views.
//!
//! Modes are ordered integers. Demotion always lands in general mode in one
//! step; promotion goes through general mode when starting from a nested
//! view. A call made at the target mode sends nothing.

use log::{debug, warn};

use super::generic::GenericDriver;
use super::outcome::{FailureKind, OperationResult};
use super::response::ExecState;
use crate::channel::PromptSpec;
use crate::error::{DriverError, Result};
use crate::platform::Mode;
use crate::transport::ShellTransport;

impl<T: ShellTransport> GenericDriver<T> {
    /// Return to general mode.
    ///
    /// On a rejected or unanswered return command the mode is left as it
    /// was.
    pub async fn demote_to_general(&mut self) -> OperationResult<()> {
        OperationResult::settle(self.try_demote().await)
    }

    async fn try_demote(&mut self) -> Result<OperationResult<()>> {
        if self.mode <= Mode::GENERAL {
            return Ok(OperationResult::Succeeded(()));
        }
        let (command, prompt) = self.enter_step(Mode::GENERAL)?;

        let execution = self.execute(&command, &prompt).await?;
        Ok(match execution.state {
            ExecState::Success => {
                debug!("{} -> {}", self.mode, Mode::GENERAL);
                self.set_mode(Mode::GENERAL);
                OperationResult::Succeeded(())
            }
            ExecState::Error => {
                OperationResult::failed(FailureKind::CommandRejected, execution.diagnostic())
            }
            ExecState::Timeout => OperationResult::failed(
                FailureKind::Timeout,
                format!("no general prompt after '{}'", command),
            ),
        })
    }

    /// Enter privileged mode (system view on VRP).
    ///
    /// A nested view is left through general mode first. A refused
    /// promotion is a [`FailureKind::Transition`] failure carrying the
    /// device's text; an unanswered one comes back as
    /// [`OperationResult::Unresolved`].
    pub async fn promote_to_privileged(&mut self) -> OperationResult<()> {
        OperationResult::settle(self.try_promote().await)
    }

    async fn try_promote(&mut self) -> Result<OperationResult<()>> {
        if self.mode == Mode::PRIVILEGED {
            return Ok(OperationResult::Succeeded(()));
        }
        if self.mode.is_nested() && !self.demote_to_general().await.is_success() {
            warn!("could not leave {} mode", self.mode);
            return Ok(OperationResult::failed(
                FailureKind::Transition,
                "demotion from nested mode to general mode failed",
            ));
        }
        let (command, prompt) = self.enter_step(Mode::PRIVILEGED)?;

        let execution = self.execute(&command, &prompt).await?;
        Ok(match execution.state {
            ExecState::Success => {
                debug!("{} -> {}", self.mode, Mode::PRIVILEGED);
                self.set_mode(Mode::PRIVILEGED);
                OperationResult::Succeeded(())
            }
            ExecState::Error => OperationResult::failed(
                FailureKind::Transition,
                format!(
                    "failed to enter privileged mode: [{}]",
                    execution.content.trim()
                ),
            ),
            ExecState::Timeout => OperationResult::Unresolved(execution),
        })
    }

    /// Enter privileged mode and mark the session as being in
    /// configuration context, which [`save_configuration`](Self::save_configuration)
    /// requires.
    pub async fn enter_configuration(&mut self) -> OperationResult<()> {
        let result = self.promote_to_privileged().await;
        if result.is_success() {
            self.config_context = true;
        }
        result
    }

    /// Command and completion patterns that move the shell into `mode`.
    fn enter_step(&self, mode: Mode) -> Result<(String, PromptSpec)> {
        let step = self
            .platform
            .level(mode)
            .and_then(|level| Some((level.enter_command.clone()?, level.enter_prompt.clone()?)));
        step.ok_or_else(|| {
            DriverError::MissingCommand {
                platform: self.platform.name.clone(),
                category: format!("entering {} mode", mode),
            }
            .into()
        })
    }
}
