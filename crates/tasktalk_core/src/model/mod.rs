//! Domain model for tracked tasks.
//!
//! # Responsibility
//! - Define the task entity and the ordered list that owns it.
//! - Keep every task invariant enforceable without storage or UI.
//!
//! # Invariants
//! - Tasks are only constructed through validated constructors.
//! - List indices exposed to users are 1-based.

pub mod task;
pub mod task_list;
