//! End-to-end cache flow over the task service with an in-memory backend.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use taskhive_core::{
    Page, PageRequest, SortDirection, Task, TaskId, TaskSortField, TaskStatus, TaskhiveResult,
    UserId,
};
use taskhive_repository::TaskRepository;
use taskhive_service::{
    CacheTtls, CreateTaskRequest, MemoryCacheStore, TaskListQuery, TaskService, TaskServiceImpl,
    UpdateTaskRequest,
};

struct InMemoryTaskRepository {
    tasks: Mutex<HashMap<TaskId, Task>>,
    /// Number of list fetches that actually reached the repository.
    list_fetches: Mutex<u32>,
}

impl InMemoryTaskRepository {
    fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
            list_fetches: Mutex::new(0),
        }
    }

    fn list_fetches(&self) -> u32 {
        *self.list_fetches.lock()
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
        *self.list_fetches.lock() += 1;

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
            .filter(|t| t.owner_id == owner && t.title.contains(term))
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

#[tokio::test]
async fn test_create_read_hit_update_reread_flow() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskServiceImpl::new(
        Arc::clone(&repository),
        Arc::new(MemoryCacheStore::new()),
        CacheTtls::default(),
    );

    let owner = UserId::new();

    // Create a record for the owner.
    let created = service
        .create_task(
            owner,
            CreateTaskRequest {
                title: "write the report".to_string(),
                description: None,
                status: TaskStatus::Pending,
                priority: 5,
            },
        )
        .await
        .unwrap();

    // First list read misses and populates the cache.
    let first = service
        .list_tasks(owner, TaskListQuery::default())
        .await
        .unwrap();
    assert!(!first.cached);
    assert_eq!(first.value.tasks.len(), 1);
    assert_eq!(repository.list_fetches(), 1);

    // Second read within the TTL is a hit with an equal result, without
    // touching the repository again.
    let second = service
        .list_tasks(owner, TaskListQuery::default())
        .await
        .unwrap();
    assert!(second.cached);
    assert_eq!(first.value, second.value);
    assert_eq!(repository.list_fetches(), 1);

    // Update the record; the mutation purges the owner's list family.
    service
        .update_task(
            owner,
            created.id,
            UpdateTaskRequest {
                title: Some("ship the report".to_string()),
                description: None,
                status: Some(TaskStatus::Completed),
                priority: None,
            },
        )
        .await
        .unwrap();

    // The next read must miss and reflect the update, not the stale entry.
    let third = service
        .list_tasks(owner, TaskListQuery::default())
        .await
        .unwrap();
    assert!(!third.cached);
    assert_eq!(third.value.tasks[0].title, "ship the report");
    assert_eq!(third.value.tasks[0].status, TaskStatus::Completed);
    assert_eq!(repository.list_fetches(), 2);
}

#[tokio::test]
async fn test_cache_expiry_forces_refetch() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskServiceImpl::new(
        Arc::clone(&repository),
        Arc::new(MemoryCacheStore::new()),
        CacheTtls {
            list: Duration::from_millis(40),
            entry: Duration::from_millis(40),
        },
    );

    let owner = UserId::new();
    service
        .create_task(
            owner,
            CreateTaskRequest {
                title: "short-lived".to_string(),
                description: None,
                status: TaskStatus::Pending,
                priority: 1,
            },
        )
        .await
        .unwrap();

    service
        .list_tasks(owner, TaskListQuery::default())
        .await
        .unwrap();
    assert_eq!(repository.list_fetches(), 1);

    // Still inside the TTL window.
    let hit = service
        .list_tasks(owner, TaskListQuery::default())
        .await
        .unwrap();
    assert!(hit.cached);

    tokio::time::sleep(Duration::from_millis(60)).await;

    let after_expiry = service
        .list_tasks(owner, TaskListQuery::default())
        .await
        .unwrap();
    assert!(!after_expiry.cached);
    assert_eq!(repository.list_fetches(), 2);
}
