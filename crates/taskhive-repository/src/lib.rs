//! # Taskhive Repository
//!
//! Data access layer: a Postgres connection pool wrapper and the
//! `TaskRepository`/`UserRepository` traits with their sqlx
//! implementations. Services depend on the traits only, so tests swap in
//! in-memory implementations.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::{PgTaskRepository, PgUserRepository};
pub use traits::*;
