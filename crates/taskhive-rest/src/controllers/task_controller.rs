//! Task management controller.

use crate::{
    extractors::{AuthenticatedUser, PaginationQuery},
    responses::{created, no_content, ok, ok_cached, ApiResult, AppError, CachedApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use taskhive_core::{SortDirection, TaskId, TaskSortField, TaskhiveError};
use taskhive_service::{
    CreateTaskRequest, TaskListQuery, TaskListResponse, TaskResponse, UpdateTaskRequest,
};
use tracing::debug;
use utoipa::IntoParams;

/// Creates the task router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/top-priority", get(top_priority_tasks))
        .route("/search", get(search_tasks))
        .route(
            "/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
}

/// Sort parameters for the task listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SortQuery {
    /// Sort field (title, status, created_at, priority).
    #[serde(default)]
    pub sort_by: TaskSortField,
    /// Sort direction (asc, desc).
    #[serde(default)]
    pub sort_direction: SortDirection,
}

/// Query parameters for the top-priority listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopPriorityParams {
    /// Number of tasks to return.
    pub n: Option<u32>,
}

/// Query parameters for the task search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring to match against title and description.
    pub query: String,
}

/// Create a new task.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<crate::responses::ApiResponse<TaskResponse>>), AppError> {
    debug!("Create task request");

    let owner = user.user_id()?;
    let response = state.task_service.create_task(owner, request).await?;
    Ok(created(response))
}

/// List the authenticated user's tasks.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    params(SortQuery, PaginationQuery),
    responses(
        (status = 200, description = "Task listing", body = TaskListResponse,
         headers(("x-cache" = String, description = "hit when served from cache, miss otherwise"))),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(sort): Query<SortQuery>,
    Query(pagination): Query<PaginationQuery>,
) -> CachedApiResult<TaskListResponse> {
    debug!("List tasks request");

    let owner = user.user_id()?;
    let query = TaskListQuery {
        sort_by: sort.sort_by,
        sort_direction: sort.sort_direction,
        page: pagination.into(),
    };
    let lookup = state.task_service.list_tasks(owner, query).await?;
    ok_cached(lookup)
}

/// Get the authenticated user's top-N priority tasks.
#[utoipa::path(
    get,
    path = "/tasks/top-priority",
    tag = "tasks",
    params(TopPriorityParams),
    responses(
        (status = 200, description = "Top priority tasks", body = [TaskResponse],
         headers(("x-cache" = String, description = "hit when served from cache, miss otherwise"))),
        (status = 400, description = "n must be greater than zero"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn top_priority_tasks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<TopPriorityParams>,
) -> CachedApiResult<Vec<TaskResponse>> {
    debug!("Top priority tasks request");

    let owner = user.user_id()?;
    let n = params.n.unwrap_or(5);
    let lookup = state.task_service.top_priority_tasks(owner, n).await?;
    ok_cached(lookup)
}

/// Search the authenticated user's tasks.
#[utoipa::path(
    get,
    path = "/tasks/search",
    tag = "tasks",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching tasks", body = [TaskResponse]),
        (status = 400, description = "Empty search term"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_tasks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<TaskResponse>> {
    debug!("Search tasks request");

    let owner = user.user_id()?;
    let tasks = state.task_service.search_tasks(owner, &params.query).await?;
    ok(tasks)
}

/// Get a task by id.
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "The task", body = TaskResponse,
         headers(("x-cache" = String, description = "hit when served from cache, miss otherwise"))),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_task(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> CachedApiResult<TaskResponse> {
    debug!("Get task request: {}", id);

    let owner = user.user_id()?;
    let task_id = parse_task_id(&id)?;
    let lookup = state.task_service.get_task(owner, task_id).await?;
    ok_cached(lookup)
}

/// Update a task.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    debug!("Update task request: {}", id);

    let owner = user.user_id()?;
    let task_id = parse_task_id(&id)?;
    let response = state.task_service.update_task(owner, task_id, request).await?;
    ok(response)
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete task request: {}", id);

    let owner = user.user_id()?;
    let task_id = parse_task_id(&id)?;
    state.task_service.delete_task(owner, task_id).await?;

    Ok(no_content())
}

fn parse_task_id(id: &str) -> Result<TaskId, AppError> {
    TaskId::parse(id)
        .map_err(|_| AppError(TaskhiveError::validation(format!("Invalid task id: {}", id))))
}
