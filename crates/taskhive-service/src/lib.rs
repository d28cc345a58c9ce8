//! # Taskhive Service
//!
//! Business logic service layer for Taskhive: the read-through cache
//! infrastructure and the task/auth services that compose it around
//! repository access.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod task_service;

mod r#impl;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use r#impl::TaskServiceImpl;
pub use task_service::*;
