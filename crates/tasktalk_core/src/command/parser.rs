//! Input line parser.
//!
//! # Responsibility
//! - Turn one raw input line into one `Command`.
//!
//! # Invariants
//! - Total: never panics, never returns an error; failures become
//!   `Command::Invalid`.
//! - Keywords match case-sensitively.
//! - The first `/by` or `/from` wins, and the first `/to` after `/from`.
//! - Delimiters count only as standalone words (`/bypass` is description text).
//! - Index range is not checked here; the task list does that at execution.

use crate::command::{Command, ParseError};
use crate::model::task::When;
use once_cell::sync::Lazy;
use regex::Regex;
use std::num::IntErrorKind;

const DEADLINE_USAGE: &str = "deadline <description> /by <YYYY-MM-DD [HH:MM]>";
const EVENT_USAGE: &str = "event <description> /from <YYYY-MM-DD [HH:MM]> /to <YYYY-MM-DD [HH:MM]>";

static DEADLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<description>.*?)(?:^|\s)/by\b(?P<by>.*)$")
        .expect("valid deadline regex")
});
static EVENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<description>.*?)(?:^|\s)/from\b(?P<from>.*?)(?:^|\s)/to\b(?P<to>.*)$")
        .expect("valid event regex")
});

/// Parses one raw input line.
pub fn parse(raw_line: &str) -> Command {
    let line = raw_line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword {
        "todo" => parse_todo(rest),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        "mark" => parse_index("mark", rest).map_or_else(invalid, |index| Command::Mark { index }),
        "unmark" => {
            parse_index("unmark", rest).map_or_else(invalid, |index| Command::Unmark { index })
        }
        "delete" => {
            parse_index("delete", rest).map_or_else(invalid, |index| Command::Delete { index })
        }
        "find" => Command::Find {
            keyword: rest.to_string(),
        },
        "list" => Command::List,
        "bye" => Command::Exit,
        other => invalid(ParseError::UnknownCommand {
            keyword: other.to_string(),
        }),
    }
}

fn invalid(reason: ParseError) -> Command {
    Command::Invalid { reason }
}

fn parse_todo(rest: &str) -> Command {
    if rest.is_empty() {
        return invalid(ParseError::EmptyDescription { command: "todo" });
    }
    Command::AddBasic {
        description: rest.to_string(),
    }
}

fn parse_deadline(rest: &str) -> Command {
    if rest.is_empty() {
        return invalid(ParseError::EmptyDescription {
            command: "deadline",
        });
    }
    let bad_format = || {
        invalid(ParseError::BadFormat {
            command: "deadline",
            usage: DEADLINE_USAGE,
        })
    };

    let Some(caps) = DEADLINE_RE.captures(rest) else {
        return bad_format();
    };
    let description = caps["description"].trim();
    if description.is_empty() {
        return invalid(ParseError::EmptyDescription {
            command: "deadline",
        });
    }
    let Some(by) = When::parse(&caps["by"]) else {
        return bad_format();
    };

    Command::AddDeadline {
        description: description.to_string(),
        by,
    }
}

fn parse_event(rest: &str) -> Command {
    if rest.is_empty() {
        return invalid(ParseError::EmptyDescription { command: "event" });
    }
    let bad_format = || {
        invalid(ParseError::BadFormat {
            command: "event",
            usage: EVENT_USAGE,
        })
    };

    let Some(caps) = EVENT_RE.captures(rest) else {
        return bad_format();
    };
    let description = caps["description"].trim();
    if description.is_empty() {
        return invalid(ParseError::EmptyDescription { command: "event" });
    }
    let (Some(from), Some(to)) = (When::parse(&caps["from"]), When::parse(&caps["to"])) else {
        return bad_format();
    };

    // Ordering of `from`/`to` is a task invariant, checked at creation.
    Command::AddEvent {
        description: description.to_string(),
        from,
        to,
    }
}

fn parse_index(command: &'static str, rest: &str) -> Result<usize, ParseError> {
    match rest.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        // Too large to address any task; the list reports it as out of range.
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        _ => Err(ParseError::BadIndex {
            command,
            value: rest.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::command::{Command, ParseError};

    #[test]
    fn keyword_is_case_sensitive() {
        assert_eq!(
            parse("TODO read"),
            Command::Invalid {
                reason: ParseError::UnknownCommand {
                    keyword: "TODO".to_string()
                }
            }
        );
    }

    #[test]
    fn index_must_be_positive_integer() {
        for input in ["mark 0", "mark -1", "mark 1.5", "mark one", "mark"] {
            assert!(
                matches!(
                    parse(input),
                    Command::Invalid {
                        reason: ParseError::BadIndex { .. }
                    }
                ),
                "expected bad index for `{input}`"
            );
        }
    }

    #[test]
    fn oversized_index_is_left_to_range_check() {
        assert_eq!(
            parse("delete 99999999999999999999999"),
            Command::Delete { index: usize::MAX }
        );
    }

    #[test]
    fn tabs_separate_keyword() {
        assert_eq!(
            parse("todo\tread book"),
            Command::AddBasic {
                description: "read book".to_string()
            }
        );
    }
}
