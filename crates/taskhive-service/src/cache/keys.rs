//! Cache key construction.
//!
//! Keys are the `:`-joined concatenation of a fixed prefix, an operation
//! identity, its positional arguments in call order, and its keyword
//! arguments as `name=value` pairs. The rendering is purely textual: the
//! builder does not canonicalize semantically-equivalent argument
//! spellings, so callers must always pass the full, default-filled
//! argument set (`page=0` and an omitted page would produce different
//! keys).
//!
//! Identifiers are UUIDs, which are fixed-width; one id can therefore
//! never be a substring-prefix of another, and the invalidation patterns
//! below never select an unrelated user's or task's entries.

use std::fmt::{Display, Write};
use taskhive_core::{PageRequest, SortDirection, TaskId, TaskSortField, UserId};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "taskhive:cache";

/// Builder for deterministic cache keys.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    key: String,
}

impl KeyBuilder {
    /// Starts a key for an operation identity (e.g. `tasks:list`).
    #[must_use]
    pub fn new(operation: &str) -> Self {
        Self {
            key: format!("{}:{}", CACHE_PREFIX, operation),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Display) -> Self {
        let _ = write!(self.key, ":{}", value);
        self
    }

    /// Appends a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: &str, value: impl Display) -> Self {
        let _ = write!(self.key, ":{}={}", name, value);
        self
    }

    /// Finishes the key.
    #[must_use]
    pub fn build(self) -> String {
        self.key
    }
}

/// Key for an owner's task listing with its full query shape.
#[must_use]
pub fn task_list(
    owner: UserId,
    sort_by: TaskSortField,
    direction: SortDirection,
    page: PageRequest,
) -> String {
    KeyBuilder::new("tasks:list")
        .arg(owner)
        .kwarg("sort", sort_by)
        .kwarg("dir", direction)
        .kwarg("page", page.page)
        .kwarg("size", page.size)
        .build()
}

/// Key for a single task read.
#[must_use]
pub fn task_by_id(owner: UserId, task: TaskId) -> String {
    KeyBuilder::new("tasks:id").arg(owner).arg(task).build()
}

/// Key for an owner's top-N priority listing.
#[must_use]
pub fn top_priority(owner: UserId, n: u32) -> String {
    KeyBuilder::new("tasks:top").arg(owner).kwarg("n", n).build()
}

/// Pattern selecting every cached task listing for an owner.
#[must_use]
pub fn task_list_pattern(owner: UserId) -> String {
    format!("tasks:list:{}", owner)
}

/// Pattern selecting every cached top-N listing for an owner.
#[must_use]
pub fn top_priority_pattern(owner: UserId) -> String {
    format!("tasks:top:{}", owner)
}

/// Pattern selecting the cached single-task read for one task.
#[must_use]
pub fn task_by_id_pattern(owner: UserId, task: TaskId) -> String {
    format!("tasks:id:{}:{}", owner, task)
}
