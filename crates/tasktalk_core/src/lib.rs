//! Core engine for TaskTalk, a chat-style task tracker.
//! This crate is the single source of truth for task invariants.

pub mod command;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use command::{parse, Command, ParseError};
pub use config::{AppConfig, ConfigError, ConfigResult};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{Task, TaskKind, TaskValidationError, When};
pub use model::task_list::{IndexOutOfRange, TaskList};
pub use repo::record::{parse_record, RecordError};
pub use repo::task_repo::{
    FileTaskRepository, InMemoryTaskRepository, LoadOutcome, LoadReport, RepoError, RepoResult,
    SkippedRecord, TaskRepository,
};
pub use service::assistant::{
    apply_command, Applied, Assistant, DispatchError, SessionState, FAREWELL_MESSAGE,
    NO_MATCHES_MESSAGE, NO_TASKS_MESSAGE,
};
pub use service::chat::{ChatSession, Render, Sender};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
