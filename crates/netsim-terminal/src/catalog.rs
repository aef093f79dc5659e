//! Command catalogs: the TOML source of command definitions and their
//! localized descriptions.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use netsim_types::{ConfigError, Defect, Language, Mode, Result};
use serde::Deserialize;

use crate::action::Action;
use crate::registry::CommandDefinition;

const BUILTIN: &str = include_str!("../data/commands.toml");

/// Looks up user-facing text by key.
pub trait Localizer {
    /// Text for `key` in `language`, if the table has it.
    fn text(&self, key: &str, language: Language) -> Option<&str>;
}

/// In-memory per-language string tables.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl StringTable {
    pub fn insert(&mut self, language: Language, key: &str, text: &str) {
        self.tables
            .entry(language)
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.tables.keys().copied()
    }
}

impl Localizer for StringTable {
    fn text(&self, key: &str, language: Language) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|t| t.get(key))
            .map(String::as_str)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "command")]
    commands: Vec<RawCommand>,
    #[serde(default)]
    descriptions: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCommand {
    command: String,
    action: String,
    modes: Vec<Mode>,
    min_args: Option<usize>,
    max_args: Option<usize>,
    description: Option<String>,
}

/// A parsed catalog. Definitions are not validated against each other until
/// they are loaded into a [`CommandRegistry`](crate::CommandRegistry).
#[derive(Debug, Clone)]
pub struct Catalog {
    pub definitions: Vec<CommandDefinition>,
    pub strings: StringTable,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN)
    }

    /// Read a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        let catalog = Self::from_toml(&text)?;
        log::info!(
            "Loaded {} commands from catalog {}",
            catalog.definitions.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse catalog text. An action id outside the known set fails with
    /// [`Defect::ActionNotImplemented`]; malformed entries with
    /// [`Defect::InvalidRegistry`].
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| Defect::InvalidRegistry(format!("catalog: {e}")))?;

        let mut definitions = Vec::with_capacity(file.commands.len());
        for raw in file.commands {
            let action: Action = raw.action.parse()?;
            let description = raw.description.unwrap_or_else(|| raw.command.clone());
            definitions.push(CommandDefinition {
                full_command: raw.command,
                action,
                modes: raw.modes,
                min_args: raw.min_args,
                max_args: raw.max_args,
                description,
            });
        }

        let mut strings = StringTable::default();
        for (code, entries) in &file.descriptions {
            let language: Language = code
                .parse()
                .map_err(|e: String| Defect::InvalidRegistry(format!("catalog: {e}")))?;
            for (key, text) in entries {
                strings.insert(language, key, text);
            }
        }
        Ok(Self {
            definitions,
            strings,
        })
    }
}
