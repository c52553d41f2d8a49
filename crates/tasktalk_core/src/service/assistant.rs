//! Command dispatcher ("the assistant").
//!
//! # Responsibility
//! - Parse one input line, apply it to the owned task list, and reply.
//! - Persist the list after every successful mutation.
//!
//! # Invariants
//! - Exactly one save per successful mutating command; none for reads,
//!   rejected input, or failed lookups.
//! - A failed save never rolls back in-memory state; it only adds a warning.
//! - After `bye` the assistant is terminated and rejects further input.

use crate::command::{parse, Command};
use crate::model::task::{Task, TaskKind};
use crate::model::task_list::TaskList;
use crate::repo::task_repo::{LoadOutcome, LoadReport, TaskRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const DEFAULT_ASSISTANT_NAME: &str = "TaskTalk";
pub const FAREWELL_MESSAGE: &str = "Bye. Hope to see you again soon!";
pub const NO_TASKS_MESSAGE: &str = "You have no tasks in your list.";
pub const NO_MATCHES_MESSAGE: &str = "No matching tasks found.";

/// Lifecycle of one interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// Conditions the caller must treat as the end of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Input arrived after `bye`.
    SessionTerminated,
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionTerminated => {
                write!(f, "this session has ended; no further input is accepted")
            }
        }
    }
}

impl Error for DispatchError {}

/// Reply produced by applying one command to a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub reply: String,
    /// Whether the list changed and must be persisted.
    pub mutated: bool,
}

impl Applied {
    fn read(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            mutated: false,
        }
    }

    fn mutation(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            mutated: true,
        }
    }
}

/// Applies `command` to `tasks` without touching storage.
///
/// `Exit` is answered with the farewell; session state is the caller's concern.
pub fn apply_command(tasks: &mut TaskList, command: Command) -> Applied {
    match command {
        Command::AddBasic { description } => add_task(tasks, description, TaskKind::Basic),
        Command::AddDeadline { description, by } => {
            add_task(tasks, description, TaskKind::Deadline { by })
        }
        Command::AddEvent {
            description,
            from,
            to,
        } => add_task(tasks, description, TaskKind::Event { from, to }),
        Command::Mark { index } => match tasks.mark_at(index, true) {
            Ok(task) => Applied::mutation(format!(
                "Nice! I've marked this task as done:\n  {task}"
            )),
            Err(err) => Applied::read(format!("Sorry, {err}.")),
        },
        Command::Unmark { index } => match tasks.mark_at(index, false) {
            Ok(task) => Applied::mutation(format!(
                "OK, I've marked this task as not done yet:\n  {task}"
            )),
            Err(err) => Applied::read(format!("Sorry, {err}.")),
        },
        Command::Delete { index } => match tasks.remove(index) {
            Ok(task) => Applied::mutation(format!(
                "Noted. I've removed this task:\n  {task}\n{}",
                count_phrase(tasks.len())
            )),
            Err(err) => Applied::read(format!("Sorry, {err}.")),
        },
        Command::List => {
            if tasks.is_empty() {
                return Applied::read(NO_TASKS_MESSAGE);
            }
            Applied::read(format!(
                "Here are the tasks in your list:\n{}",
                numbered_lines(tasks.iter())
            ))
        }
        Command::Find { keyword } => {
            let matches = tasks.find_by_keyword(&keyword);
            if matches.is_empty() {
                return Applied::read(NO_MATCHES_MESSAGE);
            }
            Applied::read(format!(
                "Here are the matching tasks in your list:\n{}",
                numbered_lines(matches)
            ))
        }
        Command::Exit => Applied::read(FAREWELL_MESSAGE),
        Command::Invalid { reason } => Applied::read(reason.to_string()),
    }
}

fn add_task(tasks: &mut TaskList, description: String, kind: TaskKind) -> Applied {
    match Task::create(description, kind) {
        Ok(task) => {
            let line = task.to_display_string();
            let count = tasks.add(task);
            Applied::mutation(format!(
                "Got it. I've added this task:\n  {line}\n{}",
                count_phrase(count)
            ))
        }
        Err(err) => Applied::read(format!("Sorry, I can't add that task: {err}.")),
    }
}

fn count_phrase(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

fn numbered_lines<'a>(entries: impl IntoIterator<Item = (usize, &'a Task)>) -> String {
    entries
        .into_iter()
        .map(|(index, task)| format!("{index}.{task}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stateful dispatcher owning the session's task list.
pub struct Assistant<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
    state: SessionState,
    name: String,
    startup_notices: Vec<String>,
}

impl<R: TaskRepository> Assistant<R> {
    /// Loads the task list from `repo` and starts a running session.
    ///
    /// A read failure starts from an empty list and is reported through
    /// `startup_notices` instead of failing.
    pub fn start(repo: R, name: impl Into<String>) -> Self {
        let location = repo.location();
        let (tasks, startup_notices) = match repo.load_all() {
            Ok(report) => {
                let notices = load_notices(&location, &report);
                (report.tasks, notices)
            }
            Err(err) => {
                warn!(
                    "event=session_start module=service status=degraded error_code=store_unreadable error={}",
                    err
                );
                (
                    TaskList::new(),
                    vec![format!(
                        "I couldn't read {location} ({err}). Starting with an empty list."
                    )],
                )
            }
        };
        info!(
            "event=session_start module=service status=ok tasks={}",
            tasks.len()
        );

        Self {
            repo,
            tasks,
            state: SessionState::Running,
            name: name.into(),
            startup_notices,
        }
    }

    pub fn greeting(&self) -> String {
        format!("Hello, I'm {}!\nWhat can I do for you?", self.name)
    }

    /// Messages describing how the task list was loaded.
    pub fn startup_notices(&self) -> &[String] {
        &self.startup_notices
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Executes one raw input line and returns the reply text.
    ///
    /// # Errors
    /// - `SessionTerminated` when called after `bye`.
    pub fn execute(&mut self, raw_line: &str) -> Result<String, DispatchError> {
        if self.state == SessionState::Terminated {
            warn!(
                "event=command_execute module=service status=rejected error_code=session_terminated"
            );
            return Err(DispatchError::SessionTerminated);
        }

        let started_at = Instant::now();
        let command = parse(raw_line);
        let command_name = command.name();
        let may_mutate = command.is_mutating();
        if let Command::Invalid { reason } = &command {
            info!(
                "event=command_execute module=service status=invalid error_code={}",
                reason.code()
            );
        }
        if command == Command::Exit {
            self.state = SessionState::Terminated;
        }

        let Applied { mut reply, mutated } = apply_command(&mut self.tasks, command);
        debug_assert!(
            may_mutate || !mutated,
            "read-only command `{command_name}` changed the task list"
        );
        if mutated {
            if let Err(err) = self.repo.save_all(&self.tasks) {
                warn!(
                    "event=command_persist module=service status=error command={} error={}",
                    command_name, err
                );
                reply.push_str(&format!(
                    "\nWarning: I couldn't save your tasks ({err}). Your changes are kept for this session."
                ));
            }
        }

        info!(
            "event=command_execute module=service status=ok command={} mutated={} tasks={} duration_us={}",
            command_name,
            mutated,
            self.tasks.len(),
            started_at.elapsed().as_micros()
        );
        Ok(reply)
    }

    /// Like `execute`, with dispatch errors rendered as reply text.
    pub fn get_response(&mut self, raw_line: &str) -> String {
        self.execute(raw_line).unwrap_or_else(|err| err.to_string())
    }
}

fn load_notices(location: &str, report: &LoadReport) -> Vec<String> {
    let mut notices = vec![match report.outcome {
        LoadOutcome::Created => format!("{location} not found. File has been created."),
        LoadOutcome::Imported => {
            format!("I found a {location} file! Your tasks have been imported.")
        }
    }];

    if !report.skipped.is_empty() {
        let details = report
            .skipped
            .iter()
            .map(|skipped| format!("line {} ({})", skipped.line_number, skipped.reason))
            .collect::<Vec<_>>()
            .join(", ");
        notices.push(format!(
            "I skipped {} unreadable line(s) in {location}: {details}",
            report.skipped.len()
        ));
    }
    notices
}

#[cfg(test)]
mod tests {
    use super::{apply_command, count_phrase};
    use crate::command::{Command, ParseError};
    use crate::model::task_list::TaskList;

    #[test]
    fn count_phrase_pluralizes() {
        assert_eq!(count_phrase(1), "Now you have 1 task in the list.");
        assert_eq!(count_phrase(0), "Now you have 0 tasks in the list.");
        assert_eq!(count_phrase(3), "Now you have 3 tasks in the list.");
    }

    #[test]
    fn invalid_command_never_mutates() {
        let mut tasks = TaskList::new();
        let applied = apply_command(
            &mut tasks,
            Command::Invalid {
                reason: ParseError::EmptyDescription { command: "todo" },
            },
        );
        assert!(!applied.mutated);
        assert_eq!(applied.reply, "The description of a todo cannot be empty.");
        assert!(tasks.is_empty());
    }

    #[test]
    fn failed_lookup_is_not_a_mutation() {
        let mut tasks = TaskList::new();
        let applied = apply_command(&mut tasks, Command::Unmark { index: 1 });
        assert!(!applied.mutated);
        assert!(applied.reply.contains("does not exist"));
    }
}
