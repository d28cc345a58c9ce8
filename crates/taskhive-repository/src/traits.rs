//! Repository traits.

use async_trait::async_trait;
use taskhive_core::{
    Page, PageRequest, SortDirection, Task, TaskId, TaskSortField, TaskhiveResult, User, UserId,
};

/// Repository for task persistence.
///
/// Every read is scoped to an owner; a task id belonging to another user
/// behaves as if it did not exist.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by id for an owner.
    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskhiveResult<Option<Task>>;

    /// Lists an owner's tasks with sorting and pagination.
    async fn find_for_owner(
        &self,
        owner: UserId,
        sort_by: TaskSortField,
        direction: SortDirection,
        page: PageRequest,
    ) -> TaskhiveResult<Page<Task>>;

    /// Returns the owner's highest-priority tasks, priority descending.
    async fn find_top_priority(&self, owner: UserId, limit: u32) -> TaskhiveResult<Vec<Task>>;

    /// Searches an owner's tasks by title/description substring.
    async fn search(&self, owner: UserId, term: &str) -> TaskhiveResult<Vec<Task>>;

    /// Inserts a new task.
    async fn save(&self, task: &Task) -> TaskhiveResult<Task>;

    /// Updates an existing task.
    async fn update(&self, task: &Task) -> TaskhiveResult<Task>;

    /// Deletes a task. Returns `true` if a row was removed.
    async fn delete(&self, owner: UserId, id: TaskId) -> TaskhiveResult<bool>;
}

/// Repository for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    async fn find_by_id(&self, id: UserId) -> TaskhiveResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> TaskhiveResult<Option<User>>;

    /// Checks whether a username or email is already taken.
    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> TaskhiveResult<bool>;

    /// Inserts a new user.
    async fn save(&self, user: &User) -> TaskhiveResult<User>;
}
