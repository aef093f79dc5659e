//! Error types for netsim.
//!
//! Failures are split into families so a caller can render one and alert on
//! another: [`UserError`] is what the operator typed wrong, [`Defect`] is a
//! broken catalog or engine invariant, [`StateError`] comes from the device
//! state store and [`ConfigError`] from the configuration file.

use std::io;

use crate::mode::Mode;

/// Rejections caused by operator input. Rendered back to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("ambiguous command: {input} (candidates: {})", .candidates.join(", "))]
    AmbiguousCommand {
        input: String,
        candidates: Vec<String>,
    },

    #[error("expected {} argument(s), got {actual}", describe_bounds(.min, .max))]
    ArgumentCount {
        min: Option<usize>,
        max: Option<usize>,
        actual: usize,
    },

    #[error("invalid value for {argument}: {reason}")]
    InvalidArgumentValue { argument: String, reason: String },
}

impl UserError {
    /// Shorthand for [`UserError::InvalidArgumentValue`].
    pub fn invalid(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgumentValue {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

fn describe_bounds(min: &Option<usize>, max: &Option<usize>) -> String {
    match (*min, *max) {
        (Some(lo), Some(hi)) if lo == hi => format!("{lo}"),
        (Some(lo), Some(hi)) => format!("{lo}..={hi}"),
        (Some(lo), None) => format!("at least {lo}"),
        (None, Some(hi)) => format!("at most {hi}"),
        (None, None) => "any number of".to_string(),
    }
}

/// Internal invariant violations. These indicate a broken command catalog or
/// an engine bug, never bad operator input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Defect {
    #[error("invalid command registry: {0}")]
    InvalidRegistry(String),

    #[error("action not implemented: {0}")]
    ActionNotImplemented(String),

    #[error("illegal mode transition {event} from {from}")]
    IllegalTransition { from: Mode, event: String },

    #[error("no configuration target selected in {0} mode")]
    MissingTarget(Mode),
}

/// Failures reported by the device state store.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt state record {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

/// Failures loading the simulator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Invalid(String),
}

/// Any error produced by the netsim crates.
#[derive(Debug, thiserror::Error)]
pub enum NetsimError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Defect(#[from] Defect),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl NetsimError {
    /// True when the failure was caused by operator input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// True when the failure is an internal defect that should be alerted on.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Defect(_))
    }
}

impl From<io::Error> for NetsimError {
    fn from(e: io::Error) -> Self {
        Self::State(StateError::Io(e))
    }
}

impl From<serde_json::Error> for NetsimError {
    fn from(e: serde_json::Error) -> Self {
        Self::State(StateError::Json(e))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NetsimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_display() {
        let e = UserError::UnknownCommand("shw".into());
        assert_eq!(format!("{e}"), "unknown command: shw");
    }

    #[test]
    fn ambiguous_command_lists_candidates() {
        let e = UserError::AmbiguousCommand {
            input: "show".into(),
            candidates: vec!["show interfaces".into(), "show ip route".into()],
        };
        assert_eq!(
            format!("{e}"),
            "ambiguous command: show (candidates: show interfaces, show ip route)"
        );
    }

    #[test]
    fn argument_count_display_exact() {
        let e = UserError::ArgumentCount {
            min: Some(1),
            max: Some(1),
            actual: 3,
        };
        assert_eq!(format!("{e}"), "expected 1 argument(s), got 3");
    }

    #[test]
    fn argument_count_display_range() {
        let e = UserError::ArgumentCount {
            min: Some(2),
            max: Some(3),
            actual: 0,
        };
        assert_eq!(format!("{e}"), "expected 2..=3 argument(s), got 0");
    }

    #[test]
    fn argument_count_display_open_ended() {
        let e = UserError::ArgumentCount {
            min: Some(3),
            max: None,
            actual: 1,
        };
        assert_eq!(format!("{e}"), "expected at least 3 argument(s), got 1");
    }

    #[test]
    fn invalid_shorthand() {
        let e = UserError::invalid("ip", "not an IPv4 address");
        assert_eq!(format!("{e}"), "invalid value for ip: not an IPv4 address");
    }

    #[test]
    fn illegal_transition_display() {
        let e = Defect::IllegalTransition {
            from: Mode::User,
            event: "enter_config".into(),
        };
        assert_eq!(format!("{e}"), "illegal mode transition enter_config from user");
    }

    #[test]
    fn families_are_distinguishable() {
        let user: NetsimError = UserError::UnknownCommand("x".into()).into();
        let defect: NetsimError = Defect::ActionNotImplemented("reload".into()).into();
        assert!(user.is_user_error());
        assert!(!user.is_defect());
        assert!(defect.is_defect());
        assert!(!defect.is_user_error());
    }

    #[test]
    fn io_error_becomes_state_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let e: NetsimError = io_err.into();
        assert!(matches!(e, NetsimError::State(StateError::Io(_))));
        assert!(format!("{e}").contains("read-only"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let e: NetsimError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: NetsimError = ConfigError::from(toml_err).into();
        assert!(format!("{e}").contains("TOML parse error"));
    }
}
