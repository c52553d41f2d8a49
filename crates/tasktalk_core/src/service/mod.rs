//! Core use-case services.
//!
//! # Responsibility
//! - Execute parsed commands against the session's task list.
//! - Keep UI front ends decoupled from parsing and storage details.

pub mod assistant;
pub mod chat;
