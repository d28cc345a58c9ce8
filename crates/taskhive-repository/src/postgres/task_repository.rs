//! Postgres task repository implementation.

use crate::{traits::TaskRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use taskhive_core::{
    Page, PageRequest, SortDirection, Task, TaskId, TaskSortField, TaskStatus, TaskhiveResult,
    UserId,
};
use tracing::debug;
use uuid::Uuid;

/// Postgres task repository.
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: Arc<DatabasePool>,
}

impl PgTaskRepository {
    /// Creates a new Postgres task repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a task.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    priority: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            description: row.description,
            status: TaskStatus::parse(&row.status),
            priority: row.priority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TASK_COLUMNS: &str =
    "id, owner_id, title, description, status, priority, created_at, updated_at";

/// Maps a sort field and direction to a static ORDER BY fragment.
///
/// Never interpolates request input into SQL; every combination resolves to
/// a fixed string.
const fn order_by_fragment(sort_by: TaskSortField, direction: SortDirection) -> &'static str {
    match (sort_by, direction) {
        (TaskSortField::Title, SortDirection::Asc) => "title ASC",
        (TaskSortField::Title, SortDirection::Desc) => "title DESC",
        (TaskSortField::Status, SortDirection::Asc) => "status ASC",
        (TaskSortField::Status, SortDirection::Desc) => "status DESC",
        (TaskSortField::CreatedAt, SortDirection::Asc) => "created_at ASC",
        (TaskSortField::CreatedAt, SortDirection::Desc) => "created_at DESC",
        (TaskSortField::Priority, SortDirection::Asc) => "priority ASC",
        (TaskSortField::Priority, SortDirection::Desc) => "priority DESC",
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskhiveResult<Option<Task>> {
        debug!("Finding task {} for owner {}", id, owner);

        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id.into_inner())
        .bind(owner.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Task::from))
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        sort_by: TaskSortField,
        direction: SortDirection,
        page: PageRequest,
    ) -> TaskhiveResult<Page<Task>> {
        debug!(
            "Listing tasks for owner {} sorted by {} {}",
            owner, sort_by, direction
        );

        let order_by = order_by_fragment(sort_by, direction);

        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 \
             ORDER BY {order_by} LIMIT $2 OFFSET $3"
        ))
        .bind(owner.into_inner())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE owner_id = $1")
            .bind(owner.into_inner())
            .fetch_one(self.pool.inner())
            .await?;

        let tasks = rows.into_iter().map(Task::from).collect();
        Ok(Page::new(tasks, page.page, page.size, total as u64))
    }

    async fn find_top_priority(&self, owner: UserId, limit: u32) -> TaskhiveResult<Vec<Task>> {
        debug!("Finding top {} priority tasks for owner {}", limit, owner);

        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 \
             ORDER BY priority DESC LIMIT $2"
        ))
        .bind(owner.into_inner())
        .bind(i64::from(limit))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn search(&self, owner: UserId, term: &str) -> TaskhiveResult<Vec<Task>> {
        debug!("Searching tasks for owner {}", owner);

        // Escape LIKE metacharacters so a literal % or _ in the term
        // matches itself.
        let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("%{}%", escaped);

        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 \
             AND (title LIKE $2 OR description LIKE $2)"
        ))
        .bind(owner.into_inner())
        .bind(pattern)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn save(&self, task: &Task) -> TaskhiveResult<Task> {
        debug!("Saving task {} for owner {}", task.id, task.owner_id);

        sqlx::query(
            "INSERT INTO tasks (id, owner_id, title, description, status, priority, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(task.id.into_inner())
        .bind(task.owner_id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(task.clone())
    }

    async fn update(&self, task: &Task) -> TaskhiveResult<Task> {
        debug!("Updating task {}", task.id);

        sqlx::query(
            "UPDATE tasks SET title = $3, description = $4, status = $5, priority = $6, \
             updated_at = $7 WHERE id = $1 AND owner_id = $2",
        )
        .bind(task.id.into_inner())
        .bind(task.owner_id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority)
        .bind(task.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(task.clone())
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> TaskhiveResult<bool> {
        debug!("Deleting task {} for owner {}", id, owner);

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id.into_inner())
            .bind(owner.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgTaskRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTaskRepository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_fragments_are_static() {
        assert_eq!(
            order_by_fragment(TaskSortField::CreatedAt, SortDirection::Desc),
            "created_at DESC"
        );
        assert_eq!(
            order_by_fragment(TaskSortField::Priority, SortDirection::Asc),
            "priority ASC"
        );
    }

    #[test]
    fn test_row_to_task_mapping() {
        let now = Utc::now();
        let row = TaskRow {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            title: "t".to_string(),
            description: None,
            status: "in_progress".to_string(),
            priority: 4,
            created_at: now,
            updated_at: now,
        };

        let task = Task::from(row);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, 4);
    }
}
