//! Task service trait definition.

use crate::cache::CacheLookup;
use crate::dto::{
    CreateTaskRequest, TaskListQuery, TaskListResponse, TaskResponse, UpdateTaskRequest,
};
use async_trait::async_trait;
use taskhive_core::{TaskId, TaskhiveResult, UserId};

/// Task service.
///
/// Reads that go through the cache return a [`CacheLookup`] so callers can
/// observe whether the value was cache-served; mutations invalidate the
/// affected cache families before returning.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Creates a new task for an owner.
    async fn create_task(
        &self,
        owner: UserId,
        request: CreateTaskRequest,
    ) -> TaskhiveResult<TaskResponse>;

    /// Lists an owner's tasks with sorting and pagination. Cached.
    async fn list_tasks(
        &self,
        owner: UserId,
        query: TaskListQuery,
    ) -> TaskhiveResult<CacheLookup<TaskListResponse>>;

    /// Gets a single task by id. Cached.
    async fn get_task(
        &self,
        owner: UserId,
        id: TaskId,
    ) -> TaskhiveResult<CacheLookup<TaskResponse>>;

    /// Returns the owner's top-N priority tasks. Cached.
    async fn top_priority_tasks(
        &self,
        owner: UserId,
        n: u32,
    ) -> TaskhiveResult<CacheLookup<Vec<TaskResponse>>>;

    /// Searches an owner's tasks by title/description substring. Uncached.
    async fn search_tasks(&self, owner: UserId, term: &str) -> TaskhiveResult<Vec<TaskResponse>>;

    /// Updates a task.
    async fn update_task(
        &self,
        owner: UserId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskhiveResult<TaskResponse>;

    /// Deletes a task.
    async fn delete_task(&self, owner: UserId, id: TaskId) -> TaskhiveResult<()>;
}
