//! Validation utilities.

use crate::{FieldError, TaskhiveError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `TaskhiveError` on failure.
    fn validate_request(&self) -> Result<(), TaskhiveError> {
        self.validate().map_err(validation_errors_to_taskhive_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `TaskhiveError`.
#[must_use]
pub fn validation_errors_to_taskhive_error(errors: ValidationErrors) -> TaskhiveError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    TaskhiveError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn test_validate_request_ok() {
        let probe = Probe {
            name: "abc".to_string(),
        };
        assert!(probe.validate_request().is_ok());
    }

    #[test]
    fn test_validate_request_error_mentions_field() {
        let probe = Probe {
            name: "a".to_string(),
        };
        let err = probe.validate_request().unwrap_err();
        assert!(err.to_string().contains("name"));
        assert!(err.to_string().contains("too short"));
    }
}
