//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use taskhive_core::{
    ErrorResponse, FieldError, PageInfo, SortDirection, TaskId, TaskSortField, TaskStatus, UserId,
};
use taskhive_service::{
    CreateTaskRequest, LoginRequest, RegisterRequest, TaskListResponse, TaskResponse,
    TokenResponse, UpdateTaskRequest, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Taskhive API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskhive API",
        version = "0.1.0",
        description = "API for managing personal tasks with user authentication",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::register,
        crate::controllers::user_controller::login,
        crate::controllers::user_controller::current_user,
        // Task endpoints
        crate::controllers::task_controller::create_task,
        crate::controllers::task_controller::list_tasks,
        crate::controllers::task_controller::top_priority_tasks,
        crate::controllers::task_controller::search_tasks,
        crate::controllers::task_controller::get_task,
        crate::controllers::task_controller::update_task,
        crate::controllers::task_controller::delete_task,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            TaskId,
            UserId,
            TaskStatus,
            TaskSortField,
            SortDirection,
            PageInfo,
            ErrorResponse,
            FieldError,
            // DTOs
            CreateTaskRequest,
            UpdateTaskRequest,
            TaskResponse,
            TaskListResponse,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            UserResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "tasks", description = "Task management endpoints"),
        (name = "users", description = "User registration and authentication"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.is_empty());
    }
}
