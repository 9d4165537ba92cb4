/// Domain error type shared by all services
///
/// Services distinguish three failure families:
///
/// - [`ServiceError::NotFound`]: a requested id/username/email did not
///   resolve to a record. List operations never produce this; an empty
///   result is an empty list.
/// - [`ServiceError::Validation`]: input failed a field constraint before
///   any persistence was attempted, including unrecognized symbolic
///   status/priority/role values.
/// - [`ServiceError::Database`]: an error raised by the store, including
///   uniqueness and referential-integrity violations. Services do not
///   pre-check uniqueness; constraint violations propagate here.

use crate::password::PasswordError;
use thiserror::Error;

/// Result alias used throughout the service layer
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unified service error
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Input failed a field constraint
    #[error("invalid value for {field}: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// Underlying store failure, including constraint violations
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failure
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ServiceError {
    /// Builds the standard not-found error for an entity lookup
    ///
    /// Every mutating service method performs its existence check through
    /// a lookup followed by `ok_or_else(|| ServiceError::not_found(...))`.
    pub fn not_found(entity: &str, key: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} not found: {}", entity, key))
    }

    /// Builds a validation error for a single field
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("task", 42);
        assert_eq!(err.to_string(), "task not found: 42");
    }

    #[test]
    fn test_validation_message() {
        let err = ServiceError::invalid("status", "unrecognized value: STARTED");
        assert_eq!(
            err.to_string(),
            "invalid value for status: unrecognized value: STARTED"
        );
    }
}
