//! Ordered task collection.
//!
//! # Responsibility
//! - Own the session's tasks in insertion order.
//! - Translate 1-based user indices into checked internal access.
//!
//! # Invariants
//! - Insertion order is display order and persisted order.
//! - Accepted user indices are always within `[1, len]`.
//! - Length only changes through `add` and `remove`.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A 1-based index that does not address an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.len == 0 {
            write!(
                f,
                "task {} does not exist; your list is empty",
                self.index
            )
        } else {
            write!(
                f,
                "task {} does not exist; pick a number from 1 to {}",
                self.index, self.len
            )
        }
    }
}

impl Error for IndexOutOfRange {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    items: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task` and returns its 1-based index.
    pub fn add(&mut self, task: Task) -> usize {
        self.items.push(task);
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Result<&Task, IndexOutOfRange> {
        let offset = self.offset(index)?;
        Ok(&self.items[offset])
    }

    /// Removes and returns the task at `index`, shifting later tasks up.
    pub fn remove(&mut self, index: usize) -> Result<Task, IndexOutOfRange> {
        let offset = self.offset(index)?;
        Ok(self.items.remove(offset))
    }

    /// Sets the completion flag of the task at `index`.
    pub fn mark_at(&mut self, index: usize, done: bool) -> Result<&Task, IndexOutOfRange> {
        let offset = self.offset(index)?;
        let task = &mut self.items[offset];
        if done {
            task.mark_done();
        } else {
            task.mark_not_done();
        }
        Ok(task)
    }

    /// Returns tasks whose description contains `keyword`, ignoring case.
    ///
    /// Each match is paired with its 1-based list index. A blank keyword
    /// matches nothing.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<(usize, &Task)> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.iter()
            .filter(|(_, task)| task.description().to_lowercase().contains(&needle))
            .collect()
    }

    /// Iterates tasks paired with their 1-based index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.items
            .iter()
            .enumerate()
            .map(|(offset, task)| (offset + 1, task))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn offset(&self, index: usize) -> Result<usize, IndexOutOfRange> {
        if index == 0 || index > self.items.len() {
            return Err(IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(index - 1)
    }
}
