//! Command line parsing
//!
//! Turns one line of user input into something the main loop can act on.

use unistate_model::ModelError;

use crate::actions::TodoAction;

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Dispatch an action to the store
    Dispatch(TodoAction),
    Help,
    Quit,
    /// Blank line
    Nothing,
    /// Input that could not be understood, with a message for the user
    Invalid(String),
}

/// Parse a single input line
pub fn parse(line: &str) -> Result<Command, ModelError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" => Command::Nothing,
        "add" | "a" if rest.is_empty() => Command::Invalid("usage: add <title>".to_string()),
        "add" | "a" => Command::Dispatch(TodoAction::add(rest)?),
        "toggle" | "t" => match rest.parse::<i64>() {
            Ok(index) => Command::Dispatch(TodoAction::toggle(index)?),
            Err(_) => Command::Invalid(format!("not a todo number: {:?}", rest)),
        },
        "clean" | "c" => Command::Dispatch(TodoAction::remove_done()),
        "filter" | "f" => Command::Dispatch(TodoAction::toggle_show_done()),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command: {}", other)),
    };
    Ok(command)
}
