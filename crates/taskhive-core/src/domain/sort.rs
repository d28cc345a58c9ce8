//! Sorting value objects for task list queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field a task listing can be sorted by.
///
/// The string form doubles as the canonical rendering in cache keys, so a
/// listing sorted by priority never shares a key with one sorted by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskSortField {
    Title,
    Status,
    #[default]
    CreatedAt,
    Priority,
}

impl TaskSortField {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for TaskSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for task list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_strings() {
        assert_eq!(TaskSortField::CreatedAt.as_str(), "created_at");
        assert_eq!(TaskSortField::Priority.to_string(), "priority");
    }

    #[test]
    fn test_defaults_match_list_endpoint() {
        assert_eq!(TaskSortField::default(), TaskSortField::CreatedAt);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }
}
