//! Saving the running configuration.
//!
//! Two flavours exist. [`save_configuration`](GenericDriver::save_configuration)
//! works on the raw stream: it leaves configuration, sends the save command,
//! answers every confirmation question as it appears and judges the result
//! by scanning for success markers. [`commit`](GenericDriver::commit) runs
//! the same dialog as two executor exchanges with fixed patterns.

use log::{debug, warn};

use super::generic::GenericDriver;
use super::outcome::{FailureKind, OperationResult};
use super::response::ExecState;
use crate::error::{DriverError, Result};
use crate::platform::Mode;
use crate::transport::ShellTransport;

impl<T: ShellTransport> GenericDriver<T> {
    /// Save the configuration from configuration context.
    ///
    /// Fails with [`FailureKind::Precondition`] without sending anything
    /// unless the session is above general mode with configuration context
    /// active. The confirmation reply is sent once per question; the save
    /// counts as successful only if a success marker appears in the output.
    pub async fn save_configuration(&mut self) -> OperationResult<()> {
        if self.mode <= Mode::GENERAL || !self.config_context {
            return OperationResult::failed(FailureKind::Precondition, "not in configuration mode");
        }
        OperationResult::settle(self.try_save().await)
    }

    async fn try_save(&mut self) -> Result<OperationResult<()>> {
        let exit = self.platform.exit_config_command.clone();
        let save = self.platform.save_command.clone();
        let reply = self.platform.confirm_reply.clone();

        self.channel.begin().await?;
        self.channel.send_line(&exit).await?;
        let deadline = self.channel.deadline();
        if !self
            .channel
            .read_until_last_line(&self.platform.prompt_pattern, deadline)
            .await?
        {
            return Ok(OperationResult::failed(
                FailureKind::Timeout,
                format!("no prompt after '{}'", exit),
            ));
        }
        self.channel.finish();
        self.config_context = false;
        self.sync_mode();
        debug!("left configuration, now in {} mode", self.mode);

        self.channel.begin().await?;
        self.channel.send_line(&save).await?;
        let deadline = self.channel.deadline();
        // offset of the last question answered, so a question is answered once
        let mut answered: Option<usize> = None;
        loop {
            let buffer = self.channel.buffer();
            if buffer.last_line_matches(&self.platform.confirm_pattern) {
                let at = buffer.last_line_start();
                if answered != Some(at) {
                    debug!("answering save confirmation with '{}'", reply);
                    answered = Some(at);
                    self.channel.send_line(&reply).await?;
                }
            } else if buffer.last_line_matches(&self.platform.prompt_pattern)
                && !buffer.last_line_matches(&self.platform.save_markers)
            {
                // a bare `[OK]` line has the shape of a prompt
                break;
            }
            if !self.channel.read_chunk(deadline).await? {
                warn!("save did not return to a prompt");
                return Ok(OperationResult::failed(
                    FailureKind::Timeout,
                    format!("no prompt after '{}'", save),
                ));
            }
        }
        self.channel.finish();

        let buffer = self.channel.buffer();
        if buffer.search_full(&self.platform.save_markers).is_some() {
            Ok(OperationResult::Succeeded(()))
        } else {
            Ok(OperationResult::failed(
                FailureKind::CommandRejected,
                buffer.as_str_lossy().trim().to_string(),
            ))
        }
    }

    /// Save the configuration through the executor.
    ///
    /// Demotes to general mode, sends the save command expecting the
    /// confirmation question, then the reply expecting the completion
    /// message. An unanswered save command comes back as
    /// [`OperationResult::Unresolved`].
    pub async fn commit(&mut self) -> OperationResult<()> {
        let demoted = self.demote_to_general().await;
        if !demoted.is_success() {
            return demoted;
        }
        OperationResult::settle(self.try_commit().await)
    }

    async fn try_commit(&mut self) -> Result<OperationResult<()>> {
        let Some(dialog) = self.platform.commit_dialog.clone() else {
            return Err(DriverError::MissingCommand {
                platform: self.platform.name.clone(),
                category: "commit".to_string(),
            }
            .into());
        };
        let save = self.platform.save_command.clone();
        let reply = self.platform.confirm_reply.clone();

        let asked = self.execute(&save, &dialog.question).await?;
        match asked.state {
            ExecState::Success => {}
            ExecState::Error => {
                return Ok(OperationResult::failed(
                    FailureKind::CommandRejected,
                    format!("the command failed to execute: [{}]", asked.content.trim()),
                ));
            }
            ExecState::Timeout => return Ok(OperationResult::Unresolved(asked)),
        }

        let done = self.execute(&reply, &dialog.done).await?;
        Ok(match done.state {
            ExecState::Success => OperationResult::Succeeded(()),
            ExecState::Error => OperationResult::failed(
                FailureKind::CommandRejected,
                format!("failed to save configuration: [{}]", done.content.trim()),
            ),
            ExecState::Timeout => OperationResult::failed(
                FailureKind::Timeout,
                format!("failed to save configuration: [{}]", done.content.trim()),
            ),
        })
    }
}
