//! Line-oriented task record codec.
//!
//! # Responsibility
//! - Decode one persisted line back into a `Task`.
//!
//! # Invariants
//! - `parse_record(&task.to_record()) == Ok(task)` for every valid task.
//! - Decoding re-runs task validation; invalid persisted state is rejected.

use crate::model::task::{Task, TaskKind, TaskValidationError, When};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure to decode one record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    FieldCount { expected: usize, found: usize },
    InvalidStatus(String),
    UnknownKind(String),
    InvalidWhen(String),
    Validation(TaskValidationError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::InvalidStatus(value) => write!(f, "invalid status bit `{value}`"),
            Self::UnknownKind(value) => write!(f, "unknown task kind `{value}`"),
            Self::InvalidWhen(value) => write!(f, "invalid date/time `{value}`"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RecordError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Decodes `<0|1> | <T|D|E> | <description>[ | <when>...]`.
pub fn parse_record(line: &str) -> Result<Task, RecordError> {
    let fields = line.split('|').map(str::trim).collect::<Vec<_>>();
    if fields.len() < 3 {
        return Err(RecordError::FieldCount {
            expected: 3,
            found: fields.len(),
        });
    }

    let is_done = match fields[0] {
        "0" => false,
        "1" => true,
        other => return Err(RecordError::InvalidStatus(other.to_string())),
    };

    let expected = match fields[1] {
        "T" => 3,
        "D" => 4,
        "E" => 5,
        other => return Err(RecordError::UnknownKind(other.to_string())),
    };
    if fields.len() != expected {
        return Err(RecordError::FieldCount {
            expected,
            found: fields.len(),
        });
    }

    let kind = match fields.as_slice() {
        [_, "D", _, by] => TaskKind::Deadline {
            by: parse_when(by)?,
        },
        [_, "E", _, from, to] => TaskKind::Event {
            from: parse_when(from)?,
            to: parse_when(to)?,
        },
        _ => TaskKind::Basic,
    };

    let mut task = Task::create(fields[2], kind)?;
    if is_done {
        task.mark_done();
    }
    Ok(task)
}

fn parse_when(value: &str) -> Result<When, RecordError> {
    When::parse(value).ok_or_else(|| RecordError::InvalidWhen(value.to_string()))
}
