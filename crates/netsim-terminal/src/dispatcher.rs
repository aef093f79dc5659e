//! Line interpretation: tokenize, resolve against the registry, check
//! argument counts, run the handler, apply its mode intent.

use netsim_types::{Mode, NetsimError, Result, UserError};

use crate::action::Action;
use crate::actions::{self, Environment};
use crate::diagnostics::Diagnostics;
use crate::registry::{CommandDefinition, CommandRegistry};
use crate::state_machine::ModeStateMachine;

/// Result of interpreting one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line held no tokens.
    Empty,
    /// A command ran.
    Completed {
        text: String,
        /// Mode after the command.
        mode: Mode,
        action: Action,
    },
}

/// A definition selected for a line, plus how many tokens were keywords.
#[derive(Debug)]
pub struct Resolved<'r> {
    pub definition: &'r CommandDefinition,
    pub keywords: usize,
}

/// Turns input lines into handler calls.
pub struct Dispatcher {
    registry: CommandRegistry,
    diagnostics: Box<dyn Diagnostics>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, diagnostics: Box<dyn Diagnostics>) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Select the definition `tokens` name in `mode`.
    ///
    /// The first token picks every legal command it prefixes. While several
    /// remain, each further token must prefix the next keyword of a
    /// candidate to keep it. Once one remains, further tokens that prefix its
    /// remaining keywords are consumed as keywords too.
    pub fn resolve<'r>(
        &'r self,
        tokens: &[&str],
        mode: Mode,
    ) -> std::result::Result<Resolved<'r>, UserError> {
        let Some(base) = tokens.first() else {
            return Err(UserError::UnknownCommand(String::new()));
        };
        let mut candidates = self.registry.query(base, mode);
        if candidates.is_empty() {
            return Err(UserError::UnknownCommand(base.to_string()));
        }

        let mut depth = 1;
        while candidates.len() > 1 && depth < tokens.len() {
            let narrowed: Vec<&CommandDefinition> = candidates
                .iter()
                .copied()
                .filter(|d| keyword_matches(d, depth, tokens[depth]))
                .collect();
            if narrowed.is_empty() {
                // A candidate with no keyword left may take this token as an
                // argument; otherwise the token is a mistyped keyword.
                if candidates.iter().all(|d| d.keyword(depth).is_some()) {
                    return Err(UserError::UnknownCommand(tokens[..=depth].join(" ")));
                }
                break;
            }
            candidates = narrowed;
            depth += 1;
        }

        let definition = match candidates.as_slice() {
            [only] => *only,
            _ => {
                return Err(UserError::AmbiguousCommand {
                    input: tokens[..depth].join(" "),
                    candidates: candidates.iter().map(|d| d.full_command.clone()).collect(),
                });
            },
        };
        while depth < tokens.len() && keyword_matches(definition, depth, tokens[depth]) {
            depth += 1;
        }
        Ok(Resolved {
            definition,
            keywords: depth,
        })
    }

    /// Interpret one input line.
    ///
    /// A rejected line leaves the mode unchanged. Handler failures are
    /// returned as-is; state written before the failure stays written.
    pub fn interpret(
        &self,
        line: &str,
        modes: &mut ModeStateMachine,
        env: &mut Environment<'_>,
    ) -> Result<Outcome> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Outcome::Empty);
        }

        let resolved = match self.resolve(&tokens, modes.mode()) {
            Ok(r) => r,
            Err(e) => {
                self.diagnostics.rejected(line, &e);
                return Err(e.into());
            },
        };
        let definition = resolved.definition;
        let args = &tokens[resolved.keywords..];
        if let Err(e) = check_arity(definition, args.len()) {
            self.diagnostics.rejected(line, &e);
            return Err(e.into());
        }

        self.diagnostics.command(definition.action, args);
        let reply = actions::invoke(definition.action, args, modes.target(), env)
            .map_err(|e| self.report(line, e))?;

        if let Some(event) = reply.event {
            modes.enter(event).map_err(|d| self.report(line, d.into()))?;
        }
        Ok(Outcome::Completed {
            text: reply.text,
            mode: modes.mode(),
            action: definition.action,
        })
    }

    fn report(&self, line: &str, error: NetsimError) -> NetsimError {
        match &error {
            NetsimError::User(e) => self.diagnostics.rejected(line, e),
            NetsimError::Defect(e) => self.diagnostics.defect(e),
            NetsimError::State(e) => self.diagnostics.state_failure(e),
            NetsimError::Config(e) => log::error!("{e}"),
        }
        error
    }
}

fn keyword_matches(definition: &CommandDefinition, index: usize, token: &str) -> bool {
    definition
        .keyword(index)
        .is_some_and(|k| k.to_lowercase().starts_with(&token.to_lowercase()))
}

fn check_arity(
    definition: &CommandDefinition,
    actual: usize,
) -> std::result::Result<(), UserError> {
    let below = definition.min_args.is_some_and(|min| actual < min);
    let above = definition.max_args.is_some_and(|max| actual > max);
    if below || above {
        return Err(UserError::ArgumentCount {
            min: definition.min_args,
            max: definition.max_args,
            actual,
        });
    }
    Ok(())
}
