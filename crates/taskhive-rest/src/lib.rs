//! # Taskhive REST
//!
//! REST API layer using Axum: task and user endpoints, health checks, and
//! Swagger UI. Cached read endpoints report provenance via the `x-cache`
//! response header.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
