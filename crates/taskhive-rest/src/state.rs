//! Application state for Axum handlers.

use std::sync::Arc;
use taskhive_service::{AuthService, TaskService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<dyn TaskService>,
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(task_service: Arc<dyn TaskService>, auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            task_service,
            auth_service,
        }
    }
}
