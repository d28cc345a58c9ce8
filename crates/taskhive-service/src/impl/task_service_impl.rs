//! Task service implementation.
//!
//! The cached reads (list, get-by-id, top-N) compose
//! [`CacheExt::get_or_compute`] around their repository fetch; mutations
//! commit first, then synchronously purge the affected cache families
//! before returning, so the next read observes fresh data.

use crate::cache::{keys, CacheExt, CacheLookup, CacheStore, CacheTtls};
use crate::dto::{
    CreateTaskRequest, TaskListQuery, TaskListResponse, TaskResponse, UpdateTaskRequest,
};
use crate::task_service::TaskService;
use async_trait::async_trait;
use std::sync::Arc;
use taskhive_core::{Task, TaskId, TaskhiveError, TaskhiveResult, UserId, ValidateExt};
use taskhive_repository::TaskRepository;
use tracing::{debug, info};

/// Task service implementation.
pub struct TaskServiceImpl<R: TaskRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheStore>,
    ttls: CacheTtls,
}

impl<R: TaskRepository> TaskServiceImpl<R> {
    /// Creates a new task service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheStore>, ttls: CacheTtls) -> Self {
        Self {
            repository,
            cache,
            ttls,
        }
    }
}

#[async_trait]
impl<R: TaskRepository + 'static> TaskService for TaskServiceImpl<R> {
    async fn create_task(
        &self,
        owner: UserId,
        request: CreateTaskRequest,
    ) -> TaskhiveResult<TaskResponse> {
        debug!("Creating task for owner {}", owner);

        request.validate_request()?;

        let task = Task::new(
            owner,
            request.title,
            request.description,
            request.status,
            request.priority,
        );

        let saved = self.repository.save(&task).await?;

        // The new task can appear in the owner's listings but has no
        // single-record entry yet.
        self.cache.invalidate(&keys::task_list_pattern(owner)).await;
        self.cache
            .invalidate(&keys::top_priority_pattern(owner))
            .await;

        info!("Task created: {}", saved.id);
        Ok(TaskResponse::from(saved))
    }

    async fn list_tasks(
        &self,
        owner: UserId,
        query: TaskListQuery,
    ) -> TaskhiveResult<CacheLookup<TaskListResponse>> {
        debug!(
            "Listing tasks for owner {} (sort: {} {}, page: {}, size: {})",
            owner, query.sort_by, query.sort_direction, query.page.page, query.page.size
        );

        let key = keys::task_list(owner, query.sort_by, query.sort_direction, query.page);
        let repository = Arc::clone(&self.repository);

        self.cache
            .get_or_compute(&key, self.ttls.list, move || async move {
                let page = repository
                    .find_for_owner(owner, query.sort_by, query.sort_direction, query.page)
                    .await?;
                Ok(TaskListResponse::from(page))
            })
            .await
    }

    async fn get_task(
        &self,
        owner: UserId,
        id: TaskId,
    ) -> TaskhiveResult<CacheLookup<TaskResponse>> {
        debug!("Getting task {} for owner {}", id, owner);

        let key = keys::task_by_id(owner, id);
        let repository = Arc::clone(&self.repository);

        self.cache
            .get_or_compute(&key, self.ttls.entry, move || async move {
                let task = repository
                    .find_by_id(owner, id)
                    .await?
                    .ok_or_else(|| TaskhiveError::not_found("Task", id))?;
                Ok(TaskResponse::from(task))
            })
            .await
    }

    async fn top_priority_tasks(
        &self,
        owner: UserId,
        n: u32,
    ) -> TaskhiveResult<CacheLookup<Vec<TaskResponse>>> {
        debug!("Getting top {} priority tasks for owner {}", n, owner);

        if n == 0 {
            return Err(TaskhiveError::validation("n must be greater than zero"));
        }

        let key = keys::top_priority(owner, n);
        let repository = Arc::clone(&self.repository);

        self.cache
            .get_or_compute(&key, self.ttls.list, move || async move {
                let tasks = repository.find_top_priority(owner, n).await?;
                Ok(tasks.into_iter().map(TaskResponse::from).collect())
            })
            .await
    }

    async fn search_tasks(&self, owner: UserId, term: &str) -> TaskhiveResult<Vec<TaskResponse>> {
        debug!("Searching tasks for owner {}", owner);

        if term.is_empty() {
            return Err(TaskhiveError::validation("Search term must not be empty"));
        }

        // Search results are never cached.
        let tasks = self.repository.search(owner, term).await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    async fn update_task(
        &self,
        owner: UserId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskhiveResult<TaskResponse> {
        debug!("Updating task {} for owner {}", id, owner);

        request.validate_request()?;

        let mut task = self
            .repository
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| TaskhiveError::not_found("Task", id))?;

        task.apply_update(
            request.title,
            request.description,
            request.status,
            request.priority,
        );

        let updated = self.repository.update(&task).await?;

        // The change can alter the single-record view and both listing
        // families for this owner, and nothing else.
        self.cache
            .invalidate(&keys::task_by_id_pattern(owner, id))
            .await;
        self.cache.invalidate(&keys::task_list_pattern(owner)).await;
        self.cache
            .invalidate(&keys::top_priority_pattern(owner))
            .await;

        info!("Task updated: {}", id);
        Ok(TaskResponse::from(updated))
    }

    async fn delete_task(&self, owner: UserId, id: TaskId) -> TaskhiveResult<()> {
        debug!("Deleting task {} for owner {}", id, owner);

        let deleted = self.repository.delete(owner, id).await?;

        if !deleted {
            return Err(TaskhiveError::not_found("Task", id));
        }

        self.cache
            .invalidate(&keys::task_by_id_pattern(owner, id))
            .await;
        self.cache.invalidate(&keys::task_list_pattern(owner)).await;
        self.cache
            .invalidate(&keys::top_priority_pattern(owner))
            .await;

        info!("Task deleted: {}", id);
        Ok(())
    }
}

impl<R: TaskRepository> std::fmt::Debug for TaskServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use taskhive_core::{Page, PageRequest, SortDirection, TaskSortField, TaskStatus};

    /// In-memory task repository for testing.
    struct InMemoryTaskRepository {
        tasks: Mutex<HashMap<TaskId, Task>>,
    }

    impl InMemoryTaskRepository {
        fn new() -> Self {
            Self {
                tasks: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl TaskRepository for InMemoryTaskRepository {
        async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskhiveResult<Option<Task>> {
            Ok(self
                .tasks
                .lock()
                .get(&id)
                .filter(|t| t.owner_id == owner)
                .cloned())
        }

        async fn find_for_owner(
            &self,
            owner: UserId,
            sort_by: TaskSortField,
            direction: SortDirection,
            page: PageRequest,
        ) -> TaskhiveResult<Page<Task>> {
            let mut tasks: Vec<Task> = self
                .tasks
                .lock()
                .values()
                .filter(|t| t.owner_id == owner)
                .cloned()
                .collect();

            tasks.sort_by(|a, b| {
                let ordering = match sort_by {
                    TaskSortField::Title => a.title.cmp(&b.title),
                    TaskSortField::Status => a.status.as_str().cmp(b.status.as_str()),
                    TaskSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                    TaskSortField::Priority => a.priority.cmp(&b.priority),
                };
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });

            let total = tasks.len() as u64;
            let tasks: Vec<Task> = tasks
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .collect();

            Ok(Page::new(tasks, page.page, page.size, total))
        }

        async fn find_top_priority(&self, owner: UserId, limit: u32) -> TaskhiveResult<Vec<Task>> {
            let mut tasks: Vec<Task> = self
                .tasks
                .lock()
                .values()
                .filter(|t| t.owner_id == owner)
                .cloned()
                .collect();
            tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
            tasks.truncate(limit as usize);
            Ok(tasks)
        }

        async fn search(&self, owner: UserId, term: &str) -> TaskhiveResult<Vec<Task>> {
            Ok(self
                .tasks
                .lock()
                .values()
                .filter(|t| {
                    t.owner_id == owner
                        && (t.title.contains(term)
                            || t.description.as_deref().is_some_and(|d| d.contains(term)))
                })
                .cloned()
                .collect())
        }

        async fn save(&self, task: &Task) -> TaskhiveResult<Task> {
            self.tasks.lock().insert(task.id, task.clone());
            Ok(task.clone())
        }

        async fn update(&self, task: &Task) -> TaskhiveResult<Task> {
            self.tasks.lock().insert(task.id, task.clone());
            Ok(task.clone())
        }

        async fn delete(&self, owner: UserId, id: TaskId) -> TaskhiveResult<bool> {
            let mut tasks = self.tasks.lock();
            match tasks.get(&id) {
                Some(task) if task.owner_id == owner => {
                    tasks.remove(&id);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    fn service() -> TaskServiceImpl<InMemoryTaskRepository> {
        TaskServiceImpl::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(MemoryCacheStore::new()),
            CacheTtls::default(),
        )
    }

    fn create_request(title: &str, priority: i32) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority,
        }
    }

    #[tokio::test]
    async fn test_list_miss_then_hit() {
        let service = service();
        let owner = UserId::new();
        service.create_task(owner, create_request("a", 1)).await.unwrap();

        let first = service.list_tasks(owner, TaskListQuery::default()).await.unwrap();
        assert!(!first.cached);

        let second = service.list_tasks(owner, TaskListQuery::default()).await.unwrap();
        assert!(second.cached);
        assert_eq!(first.value, second.value);
    }

    #[tokio::test]
    async fn test_create_invalidates_listings() {
        let service = service();
        let owner = UserId::new();
        service.create_task(owner, create_request("a", 1)).await.unwrap();

        // Populate both cached families.
        service.list_tasks(owner, TaskListQuery::default()).await.unwrap();
        service.top_priority_tasks(owner, 5).await.unwrap();

        service.create_task(owner, create_request("b", 9)).await.unwrap();

        let listed = service.list_tasks(owner, TaskListQuery::default()).await.unwrap();
        assert!(!listed.cached);
        assert_eq!(listed.value.tasks.len(), 2);

        let top = service.top_priority_tasks(owner, 5).await.unwrap();
        assert!(!top.cached);
        assert_eq!(top.value[0].title, "b");
    }

    #[tokio::test]
    async fn test_update_invalidates_entry_and_listings() {
        let service = service();
        let owner = UserId::new();
        let created = service.create_task(owner, create_request("a", 1)).await.unwrap();

        // Warm the single-record and list caches.
        service.get_task(owner, created.id).await.unwrap();
        service.list_tasks(owner, TaskListQuery::default()).await.unwrap();

        let update = UpdateTaskRequest {
            title: Some("renamed".to_string()),
            description: None,
            status: Some(TaskStatus::InProgress),
            priority: None,
        };
        service.update_task(owner, created.id, update).await.unwrap();

        let fetched = service.get_task(owner, created.id).await.unwrap();
        assert!(!fetched.cached);
        assert_eq!(fetched.value.title, "renamed");
        assert_eq!(fetched.value.status, TaskStatus::InProgress);

        let listed = service.list_tasks(owner, TaskListQuery::default()).await.unwrap();
        assert!(!listed.cached);
        assert_eq!(listed.value.tasks[0].title, "renamed");
    }

    #[tokio::test]
    async fn test_update_does_not_evict_other_owner() {
        let service = service();
        let alice = UserId::new();
        let bob = UserId::new();

        let alice_task = service.create_task(alice, create_request("a", 1)).await.unwrap();
        service.create_task(bob, create_request("b", 1)).await.unwrap();

        // Warm both owners' list caches.
        service.list_tasks(alice, TaskListQuery::default()).await.unwrap();
        service.list_tasks(bob, TaskListQuery::default()).await.unwrap();

        let update = UpdateTaskRequest {
            title: Some("renamed".to_string()),
            description: None,
            status: None,
            priority: None,
        };
        service.update_task(alice, alice_task.id, update).await.unwrap();

        // Bob's listing is untouched by Alice's invalidation.
        let bob_listing = service.list_tasks(bob, TaskListQuery::default()).await.unwrap();
        assert!(bob_listing.cached);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let owner = UserId::new();
        let created = service.create_task(owner, create_request("a", 1)).await.unwrap();

        service.get_task(owner, created.id).await.unwrap();
        service.delete_task(owner, created.id).await.unwrap();

        let err = service.get_task(owner, created.id).await.unwrap_err();
        assert!(matches!(err, TaskhiveError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_task_not_found_is_never_cached() {
        let service = service();
        let owner = UserId::new();
        let ghost = TaskId::new();

        let err = service.get_task(owner, ghost).await.unwrap_err();
        assert!(matches!(err, TaskhiveError::NotFound { .. }));

        // Creating the task afterwards must not be shadowed by a cached
        // failure.
        let task = Task::new(owner, "late".to_string(), None, TaskStatus::Pending, 1);
        let task = Task { id: ghost, ..task };
        service.repository.save(&task).await.unwrap();

        let fetched = service.get_task(owner, ghost).await.unwrap();
        assert_eq!(fetched.value.title, "late");
    }

    #[tokio::test]
    async fn test_get_task_of_other_owner_is_not_found() {
        let service = service();
        let alice = UserId::new();
        let bob = UserId::new();
        let created = service.create_task(alice, create_request("a", 1)).await.unwrap();

        let err = service.get_task(bob, created.id).await.unwrap_err();
        assert!(matches!(err, TaskhiveError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_top_priority_rejects_zero() {
        let service = service();
        let err = service.top_priority_tasks(UserId::new(), 0).await.unwrap_err();
        assert!(matches!(err, TaskhiveError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_is_uncached_and_validates_term() {
        let service = service();
        let owner = UserId::new();
        service
            .create_task(owner, create_request("find the needle", 1))
            .await
            .unwrap();

        let err = service.search_tasks(owner, "").await.unwrap_err();
        assert!(matches!(err, TaskhiveError::Validation(_)));

        let hits = service.search_tasks(owner, "needle").await.unwrap();
        assert_eq!(hits.len(), 1);

        // A second identical search hits the repository again, not a cache.
        let hits = service.search_tasks(owner, "needle").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_different_pages_are_cached_separately() {
        let service = service();
        let owner = UserId::new();
        for i in 0..3 {
            service
                .create_task(owner, create_request(&format!("t{}", i), 1))
                .await
                .unwrap();
        }

        let page0 = TaskListQuery {
            page: PageRequest::new(0, 2),
            ..TaskListQuery::default()
        };
        let page1 = TaskListQuery {
            page: PageRequest::new(1, 2),
            ..TaskListQuery::default()
        };

        let first = service.list_tasks(owner, page0).await.unwrap();
        let second = service.list_tasks(owner, page1).await.unwrap();
        assert!(!second.cached);
        assert_ne!(first.value.tasks, second.value.tasks);
    }
}
