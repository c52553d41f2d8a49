//! Persistence boundary for the task list.
//!
//! # Responsibility
//! - Define the load-all/save-all repository contract.
//! - Own the line-oriented record format and file handling.
//!
//! # Invariants
//! - Repositories only read `&TaskList` snapshots; they never mutate the
//!   session's list.
//! - Record encoding and decoding are exact inverses for valid tasks.

pub mod record;
pub mod task_repo;
