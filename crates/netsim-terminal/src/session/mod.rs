//! One interactive CLI session: dispatcher, mode machine, device state and
//! command history behind a single facade.

use netsim_state::{StateStore, records};
use netsim_types::{DeviceType, Language, Mode, Result, SimConfig};

use crate::action::Action;
use crate::actions::Environment;
use crate::catalog::{Catalog, Localizer, StringTable};
use crate::diagnostics::Diagnostics;
use crate::dispatcher::{Dispatcher, Outcome};
use crate::registry::CommandRegistry;
use crate::state_machine::ModeStateMachine;
use crate::suggest;

/// A help line: command and its localized description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub command: String,
    pub description: String,
}

pub struct Session {
    dispatcher: Dispatcher,
    modes: ModeStateMachine,
    store: Box<dyn StateStore>,
    strings: StringTable,
    device: DeviceType,
    language: Language,
    hostname: String,
    history: Vec<String>,
    history_limit: usize,
}

impl Session {
    /// Start a session in user mode.
    ///
    /// Fails if the catalog does not form a valid registry. A device state
    /// without a hostname is given the configured one.
    pub fn new(
        catalog: Catalog,
        mut store: Box<dyn StateStore>,
        config: &SimConfig,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Result<Self> {
        let registry = CommandRegistry::load(catalog.definitions)?;
        let hostname = match records::hostname(store.as_ref())? {
            Some(name) => name,
            None => {
                let name = config.initial_hostname().to_string();
                records::set_hostname(store.as_mut(), &name)?;
                name
            },
        };
        log::info!(
            "Session started: {} '{hostname}', {} commands, language {}",
            config.device.display_name(),
            registry.len(),
            config.language
        );
        Ok(Self {
            dispatcher: Dispatcher::new(registry, diagnostics),
            modes: ModeStateMachine::new(),
            store,
            strings: catalog.strings,
            device: config.device,
            language: config.language,
            hostname,
            history: Vec::new(),
            history_limit: config.history_limit.max(1),
        })
    }

    /// Interpret one line. Non-blank lines are added to the history whether
    /// or not they succeed.
    pub fn interpret(&mut self, line: &str) -> Result<Outcome> {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            self.remember(trimmed);
        }
        let mut env = Environment {
            device: self.device,
            store: &mut *self.store,
            history: &self.history,
        };
        let outcome = self.dispatcher.interpret(line, &mut self.modes, &mut env)?;
        if let Outcome::Completed {
            action: Action::SetHostname,
            ..
        } = outcome
            && let Some(name) = records::hostname(self.store.as_ref())?
        {
            self.hostname = name;
        }
        Ok(outcome)
    }

    fn remember(&mut self, line: &str) {
        self.history.push(line.to_string());
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }
    }

    /// Commands legal in the current mode that start with both
    /// `typed_prefix` and `text`.
    pub fn complete(&self, text: &str, typed_prefix: &str) -> Vec<String> {
        self.dispatcher
            .registry()
            .complete(text, typed_prefix, self.modes.mode())
    }

    /// Legal commands that look like `input`.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        let legal: Vec<&str> = self
            .dispatcher
            .registry()
            .legal_in(self.modes.mode())
            .into_iter()
            .map(|d| d.full_command.as_str())
            .collect();
        suggest::suggest(input, &legal)
    }

    /// Commands legal in the current mode with descriptions in the session
    /// language, falling back to English and then to the bare command.
    pub fn help(&self) -> Vec<HelpEntry> {
        self.dispatcher
            .registry()
            .legal_in(self.modes.mode())
            .into_iter()
            .map(|d| {
                let description = self
                    .strings
                    .text(&d.description, self.language)
                    .or_else(|| self.strings.text(&d.description, Language::En))
                    .unwrap_or(&d.full_command);
                HelpEntry {
                    command: d.full_command.clone(),
                    description: description.to_string(),
                }
            })
            .collect()
    }

    /// Prompt for the current mode and hostname.
    pub fn prompt(&self) -> String {
        self.modes.prompt(&self.hostname)
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn device(&self) -> DeviceType {
        self.device
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Lines entered this session, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Make the device state durable.
    pub fn save(&mut self) -> Result<()> {
        self.store.flush()
    }
}

#[cfg(test)]
mod tests;
