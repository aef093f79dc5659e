//! Where the dispatcher reports what happened to each command.

use netsim_types::{Defect, StateError, UserError};

use crate::action::Action;

/// Sink for command outcomes, handed to the dispatcher at construction.
pub trait Diagnostics {
    /// A command resolved and its handler is about to run.
    fn command(&self, action: Action, args: &[&str]);

    /// Operator input was rejected.
    fn rejected(&self, line: &str, error: &UserError);

    /// The catalog or the engine broke an invariant.
    fn defect(&self, error: &Defect);

    /// The state store failed.
    fn state_failure(&self, error: &StateError);
}

/// Forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn command(&self, action: Action, args: &[&str]) {
        log::info!(target: "netsim::command", "{action} {args:?}");
    }

    fn rejected(&self, line: &str, error: &UserError) {
        log::warn!(target: "netsim::user", "{line:?}: {error}");
    }

    fn defect(&self, error: &Defect) {
        log::error!(target: "netsim::defect", "{error}");
    }

    fn state_failure(&self, error: &StateError) {
        log::error!(target: "netsim::state", "{error}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn command(&self, _action: Action, _args: &[&str]) {}

    fn rejected(&self, _line: &str, _error: &UserError) {}

    fn defect(&self, _error: &Defect) {}

    fn state_failure(&self, _error: &StateError) {}
}
