//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task entity and its kind-specific temporal fields.
//! - Render tasks for the chat transcript and for the persisted record format.
//!
//! # Invariants
//! - `description` is non-blank, trimmed, and immutable after creation.
//! - `description` never contains record-breaking characters (`|`, newlines).
//! - An event's `from` is never later than its `to`.
//! - `is_done` only changes through `mark_done` / `mark_not_done`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_TIME_COMPACT_FORMAT: &str = "%Y-%m-%d %H%M";

/// Characters that would corrupt a line-oriented record.
const RESERVED_CHARS: [char; 3] = ['|', '\n', '\r'];

/// A point in time attached to deadline and event tasks.
///
/// Keeps the precision the user typed: a bare date stays a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum When {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl When {
    /// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HHMM`.
    ///
    /// Returns `None` for anything else, including trailing garbage.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
            return Some(Self::DateTime(date_time));
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, DATE_TIME_COMPACT_FORMAT) {
            return Some(Self::DateTime(date_time));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .map(Self::Date)
    }

    /// Bare dates resolve to midnight.
    pub fn as_date_time(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN),
            Self::DateTime(date_time) => *date_time,
        }
    }

    /// Returns whether `self` is strictly later than `other`.
    pub fn is_after(&self, other: &When) -> bool {
        self.as_date_time() > other.as_date_time()
    }
}

impl Display for When {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::DateTime(date_time) => write!(f, "{}", date_time.format(DATE_TIME_FORMAT)),
        }
    }
}

impl From<When> for String {
    fn from(value: When) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for When {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid date/time `{value}`"))
    }
}

/// Task category with the temporal fields each category requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain to-do item.
    Basic,
    /// Must be done by `by`.
    Deadline { by: When },
    /// Spans `from` to `to`.
    Event { from: When, to: When },
}

impl TaskKind {
    /// Single-letter icon used in display strings and records.
    pub fn icon(&self) -> char {
        match self {
            Self::Basic => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }
}

/// Validation failure raised while creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
    ReservedCharacter(char),
    InvalidEventWindow { from: When, to: When },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "the description of a task cannot be empty"),
            Self::ReservedCharacter(ch) => {
                write!(f, "the description cannot contain {ch:?}")
            }
            Self::InvalidEventWindow { from, to } => {
                write!(f, "an event cannot end ({to}) before it starts ({from})")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// A tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire")]
pub struct Task {
    description: String,
    is_done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

#[derive(Deserialize)]
struct TaskWire {
    description: String,
    #[serde(default)]
    is_done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskWire) -> Result<Self, Self::Error> {
        let mut task = Task::create(value.description, value.kind)?;
        if value.is_done {
            task.mark_done();
        }
        Ok(task)
    }
}

impl Task {
    /// Creates a not-done task after validating description and kind.
    ///
    /// The description is stored trimmed.
    ///
    /// # Errors
    /// - `EmptyDescription` when the description is blank.
    /// - `ReservedCharacter` when it contains `|` or a line break.
    /// - `InvalidEventWindow` when an event starts after it ends.
    pub fn create(
        description: impl Into<String>,
        kind: TaskKind,
    ) -> Result<Self, TaskValidationError> {
        let description = description.into();
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        if let Some(ch) = description.chars().find(|ch| RESERVED_CHARS.contains(ch)) {
            return Err(TaskValidationError::ReservedCharacter(ch));
        }
        if let TaskKind::Event { from, to } = kind {
            if from.is_after(&to) {
                return Err(TaskValidationError::InvalidEventWindow { from, to });
            }
        }

        Ok(Self {
            description: description.to_string(),
            is_done: false,
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Marks this task as done. No-op when already done.
    pub fn mark_done(&mut self) {
        self.is_done = true;
    }

    /// Marks this task as not done. No-op when not done.
    pub fn mark_not_done(&mut self) {
        self.is_done = false;
    }

    fn status_icon(&self) -> char {
        if self.is_done {
            'X'
        } else {
            ' '
        }
    }

    /// Returns the transcript form, e.g. `[D][ ] submit report (by: 2024-12-01)`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Returns the persisted record line, e.g. `0 | D | submit report | 2024-12-01`.
    ///
    /// Must stay the exact inverse of `repo::record::parse_record`.
    pub fn to_record(&self) -> String {
        let status = if self.is_done { "1" } else { "0" };
        let mut record = format!("{status} | {} | {}", self.kind.icon(), self.description);
        match &self.kind {
            TaskKind::Basic => {}
            TaskKind::Deadline { by } => {
                record.push_str(&format!(" | {by}"));
            }
            TaskKind::Event { from, to } => {
                record.push_str(&format!(" | {from} | {to}"));
            }
        }
        record
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.icon(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Basic => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {by})"),
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}
