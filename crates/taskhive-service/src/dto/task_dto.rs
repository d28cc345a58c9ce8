//! Task-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhive_core::{
    Page, PageInfo, PageRequest, SortDirection, Task, TaskId, TaskSortField, TaskStatus, UserId,
};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    #[validate(range(min = 1, max = 10, message = "Priority must be between 1 and 10"))]
    #[serde(default = "default_priority")]
    pub priority: i32,
}

const fn default_priority() -> i32 {
    1
}

/// Request to update a task. Omitted fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    #[validate(range(min = 1, max = 10, message = "Priority must be between 1 and 10"))]
    pub priority: Option<i32>,
}

/// Query shape for a task listing.
///
/// Always fully populated before key construction; the defaults mirror the
/// list endpoint's defaults (newest first).
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskListQuery {
    pub sort_by: TaskSortField,
    pub sort_direction: SortDirection,
    pub page: PageRequest,
}

/// Task response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: TaskId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            owner_id: task.owner_id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Task list response with pagination info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
    pub page: PageInfo,
}

impl From<Page<Task>> for TaskListResponse {
    fn from(page: Page<Task>) -> Self {
        let info = page.info;
        Self {
            tasks: page.into_iter().map(TaskResponse::from).collect(),
            page: info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhive_core::ValidateExt;

    #[test]
    fn test_create_request_defaults() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(request.status, TaskStatus::Pending);
        assert_eq!(request.priority, 1);
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_create_request_rejects_out_of_range_priority() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "Buy milk", "priority": 11}"#).unwrap();
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let request: UpdateTaskRequest =
            serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(request.status, Some(TaskStatus::Completed));
        assert!(request.title.is_none());
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_list_response_from_page() {
        let owner = UserId::new();
        let tasks = vec![Task::new(
            owner,
            "one".to_string(),
            None,
            TaskStatus::Pending,
            1,
        )];

        let response = TaskListResponse::from(Page::new(tasks, 0, 20, 1));
        assert_eq!(response.tasks.len(), 1);
        assert_eq!(response.page.total_elements, 1);
    }
}
