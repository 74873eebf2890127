//! Per-category command and pattern catalog.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;

use crate::channel::PromptSpec;

/// Category of a read operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Logging,
    Version,
    Ntp,
    Snmp,
    Vlan,
    Route,
    Interface,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Logging => "logging",
            Category::Version => "version",
            Category::Ntp => "ntp",
            Category::Snmp => "snmp",
            Category::Vlan => "vlan",
            Category::Route => "route",
            Category::Interface => "interface",
        };
        f.write_str(name)
    }
}

/// The command for one category, its completion patterns and an optional
/// field extractor.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command line sent to the device.
    pub command: String,

    /// Success/error patterns for the exchange.
    pub prompt: PromptSpec,

    /// Extraction pattern; capture group 1 is the value.
    pub extract: Option<Regex>,
}

impl CommandSpec {
    /// Create a spec without an extractor.
    pub fn new(command: impl Into<String>, prompt: PromptSpec) -> Self {
        Self {
            command: command.into(),
            prompt,
            extract: None,
        }
    }

    /// Set the extraction pattern.
    pub fn with_extract(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.extract = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Every capture of group 1, in order of appearance.
    pub fn extract_all(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.extract else {
            return Vec::new();
        };
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// The first capture of group 1, trimmed.
    pub fn extract_first(&self, text: &str) -> Option<String> {
        self.extract
            .as_ref()?
            .captures(text)?
            .get(1)
            .map(|m| m.as_str().trim().to_string())
    }
}

/// Command specs keyed by category.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    entries: IndexMap<Category, CommandSpec>,
}

impl CommandCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the spec for a category.
    pub fn with(mut self, category: Category, spec: CommandSpec) -> Self {
        self.entries.insert(category, spec);
        self
    }

    /// Get the spec for a category.
    pub fn get(&self, category: Category) -> Option<&CommandSpec> {
        self.entries.get(&category)
    }

    /// Categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
