//! Result type aliases for Taskhive.

use crate::TaskhiveError;

/// A specialized `Result` type for Taskhive operations.
pub type TaskhiveResult<T> = Result<T, TaskhiveError>;
