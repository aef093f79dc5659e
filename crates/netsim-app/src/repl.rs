//! Line-oriented read/eval/print loop around a [`Session`].

use std::io::{BufRead, Write};

use anyhow::Result;
use netsim_terminal::{Action, Outcome, Session};
use netsim_types::{Mode, NetsimError, UserError};

use crate::render;

/// What the operator asked for on one line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Help,
    Complete(&'a str),
    Quit,
    Command(&'a str),
}

impl<'a> Input<'a> {
    fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        let is = |words: &[&str]| words.iter().any(|w| trimmed.eq_ignore_ascii_case(w));
        if is(&["?", "help"]) {
            Input::Help
        } else if is(&["quit", "bye", "logout"]) {
            Input::Quit
        } else {
            match trimmed.strip_suffix('?') {
                Some(text) => Input::Complete(text),
                None => Input::Command(line),
            }
        }
    }
}

/// Run until the operator quits or `input` ends, then save the device state.
pub fn run(session: &mut Session, input: impl BufRead, output: &mut impl Write) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(output, "{}", session.prompt())?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        match Input::classify(&line) {
            Input::Help => writeln!(output, "{}", render::help(&session.help()))?,
            Input::Complete(text) => complete(session, text, output)?,
            Input::Quit => break,
            Input::Command(text) => {
                if !execute(session, text, output)? {
                    break;
                }
            },
        }
    }

    if let Err(e) = session.save() {
        log::error!("Failed to save device state: {e}");
        writeln!(output, "{}", render::error(&e, &[]))?;
    }
    Ok(())
}

/// Interpret one command. Returns false when the session should end.
fn execute(session: &mut Session, line: &str, output: &mut impl Write) -> Result<bool> {
    let before = session.mode();
    match session.interpret(line) {
        Ok(Outcome::Empty) => {},
        Ok(Outcome::Completed { text, action, .. }) => {
            if !text.is_empty() {
                writeln!(output, "{text}")?;
            }
            if action == Action::ExitMode && before == Mode::User {
                return Ok(false);
            }
        },
        Err(e) => {
            let suggestions = match &e {
                NetsimError::User(UserError::UnknownCommand(_)) => session.suggest(line.trim()),
                _ => Vec::new(),
            };
            writeln!(output, "{}", render::error(&e, &suggestions))?;
        },
    }
    Ok(true)
}

fn complete(session: &Session, text: &str, output: &mut impl Write) -> Result<()> {
    let typed = match text.rsplit_once(char::is_whitespace) {
        Some((words, _)) => words.trim_end(),
        None => "",
    };
    let matches = session.complete(text.trim_start(), typed.trim_start());
    if matches.is_empty() {
        writeln!(output, "% Unrecognized command")?;
    } else {
        for command in matches {
            writeln!(output, "  {command}")?;
        }
    }
    Ok(())
}
