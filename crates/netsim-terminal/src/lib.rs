//! Command interpretation engine for the netsim CLI.
//!
//! A line typed at the prompt is resolved against the [`CommandRegistry`]
//! for the current mode (keywords may be abbreviated to any unique prefix),
//! checked for arity, and handed to the action handler it names. Handlers
//! read and write device state through a `StateStore` and may ask the
//! [`ModeStateMachine`] to change mode. [`Session`] ties the pieces together
//! with history, help and suggestions.

pub mod action;
pub mod actions;
pub mod catalog;
pub mod diagnostics;
pub mod dispatcher;
pub mod registry;
pub mod session;
pub mod state_machine;
pub mod suggest;

#[cfg(test)]
pub(crate) mod test_utils;

/// Closed set of operations a command can bind to.
pub use action::Action;
/// Handler context and handler result.
pub use actions::{ActionReply, Environment};
/// Command definitions and localized strings loaded from TOML.
pub use catalog::{Catalog, Localizer, StringTable};
/// Observability hooks for interpreted lines.
pub use diagnostics::{Diagnostics, LogDiagnostics, NullDiagnostics};
/// Line interpretation against a registry.
pub use dispatcher::{Dispatcher, Outcome};
/// Validated, mode-indexed command definitions.
pub use registry::{CommandDefinition, CommandRegistry};
/// Interactive session facade.
pub use session::{HelpEntry, Session};
/// Mode transitions and configuration targets.
pub use state_machine::{ConfigTarget, ModeEvent, ModeStateMachine};
