//! Device-style rendering of errors and help listings.

use netsim_terminal::HelpEntry;
use netsim_types::{NetsimError, UserError};

/// Render a rejected line. `suggestions` follow an unknown command.
pub fn error(error: &NetsimError, suggestions: &[String]) -> String {
    match error {
        NetsimError::User(e) => user_error(e, suggestions),
        NetsimError::Defect(_) => "% Internal error, command not executed".to_string(),
        NetsimError::State(e) => format!("% Device state unavailable: {e}"),
        NetsimError::Config(e) => format!("% Configuration error: {e}"),
    }
}

fn user_error(error: &UserError, suggestions: &[String]) -> String {
    match error {
        UserError::UnknownCommand(input) => {
            let mut text = format!("% Unknown command: \"{input}\"");
            if !suggestions.is_empty() {
                text.push_str("\nDid you mean:");
                for s in suggestions {
                    text.push_str(&format!("\n  {s}"));
                }
            }
            text
        },
        UserError::AmbiguousCommand { input, candidates } => {
            format!("% Ambiguous command: \"{input}\" ({})", candidates.join(", "))
        },
        UserError::ArgumentCount { min, actual, .. } if min.is_some_and(|m| *actual < m) => {
            "% Incomplete command.".to_string()
        },
        UserError::ArgumentCount { .. } => format!("% Invalid input: {error}"),
        UserError::InvalidArgumentValue { argument, reason } => {
            format!("% Invalid {argument}: {reason}")
        },
    }
}

/// Two-column help listing.
pub fn help(entries: &[HelpEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.command.chars().count())
        .max()
        .unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("  {:<width$}  {}", e.command, e.description))
        .collect::<Vec<_>>()
        .join("\n")
}
