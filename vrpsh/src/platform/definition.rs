//! Platform definition for vendor-specific configurations.

use std::fmt;
use std::sync::Arc;

use regex::bytes::Regex;

use super::catalog::CommandCatalog;
use crate::channel::PromptSpec;
use super::mode::{Mode, ModeLevel};
use super::{DefaultBehavior, VendorBehavior};

/// The two exchanges of an executor-driven save: the save command up to its
/// confirmation question, then the reply up to the completion message.
#[derive(Debug, Clone)]
pub struct CommitDialog {
    /// Patterns for the save command.
    pub question: PromptSpec,

    /// Patterns for the confirmation reply.
    pub done: PromptSpec,
}

/// Platform definition containing all vendor-specific configuration.
#[derive(Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "huawei_vrp").
    pub name: String,

    /// Terminator between lines of device output.
    pub line_terminator: String,

    /// Terminator appended to every line sent.
    pub send_terminator: String,

    /// Mode levels, checked in order against the prompt.
    pub levels: Vec<ModeLevel>,

    /// Mode assumed when the prompt matches no level.
    pub default_mode: Mode,

    /// Any idle prompt, matched against the trimmed final line.
    pub prompt_pattern: Regex,

    /// Command that leaves configuration back to general mode.
    pub exit_config_command: String,

    /// Command that saves the running configuration.
    pub save_command: String,

    /// Confirmation question asked by the save command.
    pub confirm_pattern: Regex,

    /// Reply sent to the confirmation question.
    pub confirm_reply: String,

    /// Markers that indicate a successful save, anywhere in the output.
    pub save_markers: Regex,

    /// Exchanges for [`commit`](crate::driver::GenericDriver::commit).
    pub commit_dialog: Option<CommitDialog>,

    /// Commands to run when the session is opened.
    pub on_open_commands: Vec<String>,

    /// Commands and patterns per read category.
    pub catalog: CommandCatalog,

    /// Table parsers.
    pub behavior: Arc<dyn VendorBehavior>,
}

impl PlatformDefinition {
    /// Create a new platform definition with minimal required fields.
    ///
    /// The prompt, confirmation and marker patterns default to patterns that
    /// never match; a usable platform sets them.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_terminator: "\n".to_string(),
            send_terminator: "\n".to_string(),
            levels: vec![],
            default_mode: Mode::GENERAL,
            prompt_pattern: never(),
            exit_config_command: String::new(),
            save_command: String::new(),
            confirm_pattern: never(),
            confirm_reply: String::new(),
            save_markers: never(),
            commit_dialog: None,
            on_open_commands: vec![],
            catalog: CommandCatalog::new(),
            behavior: Arc::new(DefaultBehavior),
        }
    }

    /// Set output and input line terminators.
    pub fn with_terminators(mut self, line: impl Into<String>, send: impl Into<String>) -> Self {
        self.line_terminator = line.into();
        self.send_terminator = send.into();
        self
    }

    /// Add a mode level.
    pub fn with_level(mut self, level: ModeLevel) -> Self {
        self.levels.push(level);
        self
    }

    /// Set the fallback mode.
    pub fn with_default_mode(mut self, mode: Mode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Set the idle prompt pattern.
    pub fn with_prompt_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.prompt_pattern = Regex::new(pattern)?;
        Ok(self)
    }

    /// Set the exit and save commands.
    pub fn with_save_commands(
        mut self,
        exit: impl Into<String>,
        save: impl Into<String>,
    ) -> Self {
        self.exit_config_command = exit.into();
        self.save_command = save.into();
        self
    }

    /// Set the confirmation question pattern and the reply to it.
    pub fn with_confirmation(
        mut self,
        pattern: &str,
        reply: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        self.confirm_pattern = Regex::new(pattern)?;
        self.confirm_reply = reply.into();
        Ok(self)
    }

    /// Set the save success markers.
    pub fn with_save_markers(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.save_markers = Regex::new(pattern)?;
        Ok(self)
    }

    /// Set the executor-driven save dialog.
    pub fn with_commit_dialog(mut self, question: PromptSpec, done: PromptSpec) -> Self {
        self.commit_dialog = Some(CommitDialog { question, done });
        self
    }

    /// Add an on_open command.
    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    /// Set the command catalog.
    pub fn with_catalog(mut self, catalog: CommandCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set vendor behavior.
    pub fn with_behavior(mut self, behavior: Arc<dyn VendorBehavior>) -> Self {
        self.behavior = behavior;
        self
    }

    /// Get the level for a mode.
    pub fn level(&self, mode: Mode) -> Option<&ModeLevel> {
        self.levels.iter().find(|level| level.mode == mode)
    }

    /// Determine the mode from a prompt line.
    pub fn determine_mode(&self, prompt: &str) -> Mode {
        let prompt = prompt.trim();
        self.levels
            .iter()
            .find(|level| level.matches(prompt))
            .map(|level| level.mode)
            .unwrap_or(self.default_mode)
    }
}

impl fmt::Debug for PlatformDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDefinition")
            .field("name", &self.name)
            .field("line_terminator", &self.line_terminator)
            .field("send_terminator", &self.send_terminator)
            .field("levels", &self.levels)
            .field("default_mode", &self.default_mode)
            .field("prompt_pattern", &self.prompt_pattern.as_str())
            .field("exit_config_command", &self.exit_config_command)
            .field("save_command", &self.save_command)
            .field("commit_dialog", &self.commit_dialog.is_some())
            .field("on_open_commands", &self.on_open_commands)
            .field("catalog", &self.catalog.len())
            .field("behavior", &"<VendorBehavior>")
            .finish()
    }
}

fn never() -> Regex {
    // Empty character class: matches nothing.
    Regex::new(r"[^\s\S]").unwrap()
}
