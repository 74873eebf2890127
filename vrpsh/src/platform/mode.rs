//! Command-line mode levels.

use std::fmt;

use regex::bytes::Regex;

use crate::channel::PromptSpec;

/// The shell's current privilege/context tier.
///
/// Levels are ordered: 1 is general (unprivileged), 2 is privileged, and
/// anything above 2 is a nested configuration view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mode(u8);

impl Mode {
    /// General, unprivileged mode.
    pub const GENERAL: Mode = Mode(1);

    /// Privileged / system mode.
    pub const PRIVILEGED: Mode = Mode(2);

    /// A mode from its raw level. Level 0 is treated as general.
    pub fn from_level(level: u8) -> Self {
        Mode(level.max(1))
    }

    /// A configuration view `depth` levels below privileged mode.
    pub fn nested(depth: u8) -> Self {
        Mode(2u8.saturating_add(depth.max(1)))
    }

    /// The raw level.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Whether this is a nested configuration view.
    pub fn is_nested(self) -> bool {
        self > Mode::PRIVILEGED
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::GENERAL
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::GENERAL => write!(f, "general"),
            Mode::PRIVILEGED => write!(f, "privileged"),
            Mode(level) => write!(f, "nested({level})"),
        }
    }
}

/// Prompt and entry command for one mode on a platform.
#[derive(Debug, Clone)]
pub struct ModeLevel {
    /// The mode this level describes.
    pub mode: Mode,

    /// Human-readable name (e.g. "user_view").
    pub name: String,

    /// Pattern matching the prompt at the end of the output.
    pub pattern: Regex,

    /// Command that moves the shell into this mode.
    pub enter_command: Option<String>,

    /// Completion patterns for the enter command.
    pub enter_prompt: Option<PromptSpec>,
}

impl ModeLevel {
    /// Create a level with minimal required fields.
    pub fn new(mode: Mode, name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            mode,
            name: name.into(),
            pattern: Regex::new(pattern)?,
            enter_command: None,
            enter_prompt: None,
        })
    }

    /// Set the command that enters this mode and the patterns it completes on.
    pub fn with_enter(mut self, command: impl Into<String>, prompt: PromptSpec) -> Self {
        self.enter_command = Some(command.into());
        self.enter_prompt = Some(prompt);
        self
    }

    /// Check if this level matches a prompt.
    pub fn matches(&self, prompt: &str) -> bool {
        self.pattern.is_match(prompt.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ordering() {
        assert!(Mode::GENERAL < Mode::PRIVILEGED);
        assert!(Mode::PRIVILEGED < Mode::nested(1));
        assert!(Mode::nested(1).is_nested());
        assert!(!Mode::PRIVILEGED.is_nested());
        assert_eq!(Mode::nested(2).level(), 4);
    }

    #[test]
    fn test_from_level_clamps_zero() {
        assert_eq!(Mode::from_level(0), Mode::GENERAL);
        assert_eq!(Mode::from_level(3), Mode::nested(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::GENERAL.to_string(), "general");
        assert_eq!(Mode::PRIVILEGED.to_string(), "privileged");
        assert_eq!(Mode::nested(1).to_string(), "nested(3)");
    }

    #[test]
    fn test_level_matches() {
        let level =
            ModeLevel::new(Mode::PRIVILEGED, "system_view", r"^\[[~*]?[\w./:@()]+\]$").unwrap();
        assert!(level.matches("[HUAWEI]"));
        assert!(level.matches("[~HUAWEI]"));
        assert!(!level.matches("[HUAWEI-GigabitEthernet0/0/1]"));
    }
}
