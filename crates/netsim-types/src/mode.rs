//! Interaction modes of the emulated device CLI.
//!
//! Modes form a fixed hierarchy. Every mode except `user` has exactly one
//! parent, which is where `exit` takes the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission / context level of a CLI session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    /// User EXEC (`Router>`).
    #[serde(rename = "user")]
    User,
    /// Privileged EXEC (`Router#`).
    #[serde(rename = "privileged")]
    Privileged,
    /// Global configuration (`Router(config)#`).
    #[serde(rename = "config")]
    Config,
    /// Interface configuration (`Router(config-if)#`).
    #[serde(rename = "config-interface")]
    ConfigInterface,
    /// VLAN configuration (`Router(config-vlan)#`).
    #[serde(rename = "config-vlan")]
    ConfigVlan,
    /// Routing process configuration (`Router(config-router)#`).
    #[serde(rename = "config-router")]
    ConfigRouter,
}

impl Mode {
    /// Every mode, root first.
    pub const ALL: [Mode; 6] = [
        Mode::User,
        Mode::Privileged,
        Mode::Config,
        Mode::ConfigInterface,
        Mode::ConfigVlan,
        Mode::ConfigRouter,
    ];

    /// The mode one level up, or `None` for `user`.
    pub fn parent(self) -> Option<Mode> {
        match self {
            Mode::User => None,
            Mode::Privileged => Some(Mode::User),
            Mode::Config => Some(Mode::Privileged),
            Mode::ConfigInterface | Mode::ConfigVlan | Mode::ConfigRouter => Some(Mode::Config),
        }
    }

    /// Number of levels below `user`.
    pub fn depth(self) -> usize {
        match self.parent() {
            Some(p) => p.depth() + 1,
            None => 0,
        }
    }

    /// True for `config` and its sub-modes.
    pub fn is_configuration(self) -> bool {
        self.depth() >= Mode::Config.depth()
    }

    /// True for the modes that edit a single object.
    pub fn is_sub_mode(self) -> bool {
        self.parent() == Some(Mode::Config)
    }

    /// Canonical label used in command catalogs.
    pub fn label(self) -> &'static str {
        match self {
            Mode::User => "user",
            Mode::Privileged => "privileged",
            Mode::Config => "config",
            Mode::ConfigInterface => "config-interface",
            Mode::ConfigVlan => "config-vlan",
            Mode::ConfigRouter => "config-router",
        }
    }

    /// Prompt suffix following the hostname.
    pub fn prompt_suffix(self) -> &'static str {
        match self {
            Mode::User => ">",
            Mode::Privileged => "#",
            Mode::Config => "(config)#",
            Mode::ConfigInterface => "(config-if)#",
            Mode::ConfigVlan => "(config-vlan)#",
            Mode::ConfigRouter => "(config-router)#",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown mode: {s}"))
    }
}
