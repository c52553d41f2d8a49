//! Typed commands parsed from raw input lines.
//!
//! # Responsibility
//! - Define the closed set of actions the assistant understands.
//! - Classify malformed input without failing the parse.
//!
//! # Invariants
//! - Every input line maps to exactly one `Command`.
//! - Parse-time checks never depend on the current task list.

pub mod parser;

use crate::model::task::When;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use parser::parse;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddBasic { description: String },
    AddDeadline { description: String, by: When },
    AddEvent { description: String, from: When, to: When },
    Mark { index: usize },
    Unmark { index: usize },
    Delete { index: usize },
    List,
    Find { keyword: String },
    Exit,
    Invalid { reason: ParseError },
}

impl Command {
    /// Returns whether executing this command changes the task list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::AddBasic { .. }
                | Self::AddDeadline { .. }
                | Self::AddEvent { .. }
                | Self::Mark { .. }
                | Self::Unmark { .. }
                | Self::Delete { .. }
        )
    }

    /// Stable short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBasic { .. } => "todo",
            Self::AddDeadline { .. } => "deadline",
            Self::AddEvent { .. } => "event",
            Self::Mark { .. } => "mark",
            Self::Unmark { .. } => "unmark",
            Self::Delete { .. } => "delete",
            Self::List => "list",
            Self::Find { .. } => "find",
            Self::Exit => "bye",
            Self::Invalid { .. } => "invalid",
        }
    }
}

/// Why an input line could not be turned into an executable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First token is not a known keyword (or the line is blank).
    UnknownCommand { keyword: String },
    /// An add command without a description.
    EmptyDescription { command: &'static str },
    /// Missing delimiter or unreadable date/time.
    BadFormat {
        command: &'static str,
        usage: &'static str,
    },
    /// Index argument is not a positive integer.
    BadIndex { command: &'static str, value: String },
}

impl ParseError {
    /// Stable error code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand { .. } => "unknown_command",
            Self::EmptyDescription { .. } => "empty_description",
            Self::BadFormat { .. } => "bad_format",
            Self::BadIndex { .. } => "bad_index",
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand { keyword } if keyword.is_empty() => {
                write!(f, "Please type a command.")
            }
            Self::UnknownCommand { keyword } => {
                write!(f, "Sorry, I don't know what `{keyword}` means.")
            }
            Self::EmptyDescription { command } => {
                write!(f, "The description of a {command} cannot be empty.")
            }
            Self::BadFormat { command, usage } => {
                write!(f, "That {command} doesn't look right. Usage: {usage}")
            }
            Self::BadIndex { command, value } if value.is_empty() => {
                write!(f, "Tell me which task to {command}, e.g. `{command} 2`.")
            }
            Self::BadIndex { command, value } => write!(
                f,
                "`{value}` is not a valid task number. Use a positive number, e.g. `{command} 2`."
            ),
        }
    }
}

impl Error for ParseError {}
