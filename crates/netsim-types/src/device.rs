//! Device kind and display language selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of network device being emulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Router,
    Switch,
}

impl DeviceType {
    /// Lower-case identifier (`router` / `switch`).
    pub fn code(self) -> &'static str {
        match self {
            DeviceType::Router => "router",
            DeviceType::Switch => "switch",
        }
    }

    /// Capitalized name, also the factory-default hostname.
    pub fn display_name(self) -> &'static str {
        match self {
            DeviceType::Router => "Router",
            DeviceType::Switch => "Switch",
        }
    }

    /// Hardware model reported by `show version`.
    pub fn model(self) -> &'static str {
        match self {
            DeviceType::Router => "ISR4321/K9",
            DeviceType::Switch => "WS-C2960X-24TS-L",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "router" | "1" => Ok(DeviceType::Router),
            "switch" | "2" => Ok(DeviceType::Switch),
            _ => Err(format!("invalid device type: {s} (choose router or switch)")),
        }
    }
}

/// Language used for command descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    He,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::He => "he",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "he" | "hebrew" => Ok(Language::He),
            _ => Err(format!("invalid language: {s} (choose en or he)")),
        }
    }
}
