//! Task entity.

use super::TaskStatus;
use crate::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Task entity owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: TaskId,

    /// Owner of the task. Every read and cache key is scoped by this.
    pub owner_id: UserId,

    /// Short title.
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Lifecycle status.
    pub status: TaskStatus,

    /// Priority from 1 (lowest) to 10 (highest).
    #[validate(range(min = 1, max = 10))]
    pub priority: i32,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task for an owner.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        title: String,
        description: Option<String>,
        status: TaskStatus,
        priority: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            owner_id,
            title,
            description,
            status,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update; `None` fields keep their current value.
    pub fn apply_update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
        priority: Option<i32>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        self.updated_at = Utc::now();
    }

    /// Marks the task completed.
    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::new(
            UserId::new(),
            "Write report".to_string(),
            None,
            TaskStatus::Pending,
            3,
        )
    }

    #[test]
    fn test_new_task_defaults() {
        let task = sample();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_apply_update_partial() {
        let mut task = sample();
        let original_title = task.title.clone();

        task.apply_update(None, Some("details".to_string()), None, Some(7));

        assert_eq!(task.title, original_title);
        assert_eq!(task.description.as_deref(), Some("details"));
        assert_eq!(task.priority, 7);
        assert!(task.updated_at >= task.created_at);
    }

    #[test]
    fn test_complete() {
        let mut task = sample();
        task.complete();
        assert_eq!(task.status, TaskStatus::Completed);
    }
}
