use thiserror::Error;

use crate::error::DatabaseErrorConverter;

/// Application-wide error taxonomy.
///
/// Every handler returns `AppResult<T>`; the `IntoResponse` impl in the API
/// layer translates each variant into the response envelope, so no error
/// propagates as an unhandled fault.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced resource absent or soft-deleted (404).
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// Unique-name collision, e.g. duplicate category name (409).
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Missing or malformed input (400).
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Malformed request body or parameters (400).
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing or invalid credentials (401).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Database operation failure (500).
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool exhaustion or checkout failure (503).
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Unexpected failure, including filesystem faults during upload (500).
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for the common "<entity> not found" case.
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
        }
    }

    /// Shorthand for a field validation failure.
    pub fn validation(field: &str, reason: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for an authorization failure.
    pub fn unauthorized(message: &str) -> Self {
        AppError::Unauthorized {
            message: message.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Internal {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> Self {
        AppError::Internal {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, reason) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, field_errors)| {
                let reason = field_errors
                    .first()
                    .and_then(|e| e.message.clone())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), reason)
            })
            .unwrap_or_else(|| ("request".to_string(), "validation failed".to_string()));
        AppError::Validation { field, reason }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity() {
        let err = AppError::not_found("Book");
        assert_eq!(err.to_string(), "Book not found");
    }

    #[test]
    fn validation_errors_convert_to_first_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1, message = "Name must not be empty"))]
            name: String,
        }

        let payload = Payload {
            name: String::new(),
        };
        let err: AppError = payload.validate().unwrap_err().into();
        match err {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert_eq!(reason, "Name must not be empty");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
