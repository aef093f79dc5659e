//! Simulator configuration, loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::device::{DeviceType, Language};
use crate::error::ConfigError;

/// Default upper bound on remembered command lines.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Top-level simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Hostname used when the device state has none yet.
    pub hostname: Option<String>,
    /// Kind of device to emulate.
    pub device: DeviceType,
    /// Language for command descriptions.
    pub language: Language,
    /// JSON file holding the persisted device state.
    pub state_path: PathBuf,
    /// Command catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Maximum number of history entries kept per session.
    pub history_limit: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            hostname: None,
            device: DeviceType::default(),
            language: Language::default(),
            state_path: PathBuf::from("netsim-state.json"),
            catalog_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. Relative paths inside the file are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            if config.state_path.is_relative() {
                config.state_path = base.join(&config.state_path);
            }
            if let Some(catalog) = config.catalog_path.as_mut()
                && catalog.is_relative()
            {
                *catalog = base.join(&*catalog);
            }
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Hostname to use for a fresh device.
    pub fn initial_hostname(&self) -> &str {
        self.hostname
            .as_deref()
            .unwrap_or_else(|| self.device.display_name())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.hostname
            && (name.is_empty() || name.contains(char::is_whitespace))
        {
            return Err(ConfigError::Invalid(format!(
                "hostname must be a single non-empty word: {name:?}"
            )));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
