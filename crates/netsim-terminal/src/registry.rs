//! Command definitions and the mode-gated registry that holds them.

use std::collections::HashSet;

use netsim_types::{Defect, Mode};

use crate::action::Action;

/// One command the CLI understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Canonical keyword sequence (`show ip route`).
    pub full_command: String,
    /// Handler to run.
    pub action: Action,
    /// Modes in which the command is legal.
    pub modes: Vec<Mode>,
    /// Minimum number of arguments after the keywords.
    pub min_args: Option<usize>,
    /// Maximum number of arguments after the keywords.
    pub max_args: Option<usize>,
    /// Localization key of the one-line description.
    pub description: String,
}

impl CommandDefinition {
    /// Build a definition with no argument bounds.
    pub fn new(full_command: &str, action: Action, modes: &[Mode]) -> Self {
        Self {
            full_command: full_command.to_string(),
            action,
            modes: modes.to_vec(),
            min_args: None,
            max_args: None,
            description: String::new(),
        }
    }

    /// Set both argument bounds.
    pub fn args(mut self, min: usize, max: usize) -> Self {
        self.min_args = Some(min);
        self.max_args = Some(max);
        self
    }

    /// Set the description key.
    pub fn described_by(mut self, key: &str) -> Self {
        self.description = key.to_string();
        self
    }

    /// Whether the command is legal in `mode`.
    pub fn allowed_in(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }

    /// The `index`th keyword of the command.
    pub fn keyword(&self, index: usize) -> Option<&str> {
        self.full_command.split_whitespace().nth(index)
    }

    /// Number of keywords in the command.
    pub fn keyword_count(&self) -> usize {
        self.full_command.split_whitespace().count()
    }

    fn normalized(&self) -> String {
        normalize(&self.full_command)
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Read-only set of command definitions, kept in load order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    /// Validate and install a command set.
    ///
    /// Fails on duplicate commands (compared case-insensitively with
    /// whitespace collapsed), empty commands, commands legal in no mode, and
    /// inverted argument bounds.
    pub fn load(definitions: Vec<CommandDefinition>) -> Result<Self, Defect> {
        let mut seen = HashSet::new();
        for def in &definitions {
            let key = def.normalized();
            if key.is_empty() {
                return Err(Defect::InvalidRegistry(format!(
                    "empty command bound to {}",
                    def.action
                )));
            }
            if def.modes.is_empty() {
                return Err(Defect::InvalidRegistry(format!(
                    "command '{}' is legal in no mode",
                    def.full_command
                )));
            }
            if let (Some(min), Some(max)) = (def.min_args, def.max_args)
                && min > max
            {
                return Err(Defect::InvalidRegistry(format!(
                    "command '{}' has min_args {min} > max_args {max}",
                    def.full_command
                )));
            }
            if !seen.insert(key) {
                return Err(Defect::InvalidRegistry(format!(
                    "duplicate command '{}'",
                    def.full_command
                )));
            }
        }
        log::debug!("Command registry loaded with {} definitions", definitions.len());
        Ok(Self { definitions })
    }

    /// Definitions whose command starts with `prefix` (case-insensitive) and
    /// that are legal in `mode`, in load order.
    pub fn query(&self, prefix: &str, mode: Mode) -> Vec<&CommandDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.allowed_in(mode) && starts_with_ignore_case(&d.full_command, prefix))
            .collect()
    }

    /// Completion candidates: the commands `query(typed_prefix, mode)` returns
    /// that also start with `text`.
    pub fn complete(&self, text: &str, typed_prefix: &str, mode: Mode) -> Vec<String> {
        self.query(typed_prefix, mode)
            .into_iter()
            .filter(|d| starts_with_ignore_case(&d.full_command, text))
            .map(|d| d.full_command.clone())
            .collect()
    }

    /// Every definition legal in `mode`, in load order.
    pub fn legal_in(&self, mode: Mode) -> Vec<&CommandDefinition> {
        self.query("", mode)
    }

    /// All definitions in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when no definition is loaded.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
