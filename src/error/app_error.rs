use thiserror::Error;

use crate::jobs::JobError;

/// Application-wide error type that represents all possible errors in the system.
///
/// Handlers return this type; the API layer maps each variant onto an HTTP
/// status and an `ErrorResponse` body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Validation errors collected from a request DTO
    #[error("Validation failed: {} field error(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Operation not allowed in the resource's current state
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Request body is not valid JSON or does not match the expected shape
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single field failure reported by `validator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<JobError> for AppError {
    fn from(error: JobError) -> Self {
        match error {
            JobError::Validation { field, reason } => AppError::Validation { field, reason },
            JobError::NotFound(id) => AppError::NotFound {
                entity: "Job".to_string(),
                field: "id".to_string(),
                value: id,
            },
            e @ JobError::InvalidState { .. } => AppError::InvalidState {
                message: e.to_string(),
            },
            e @ JobError::Scheduler(_) => AppError::Internal {
                source: anyhow::Error::from(e),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationErrors {
            errors: field_errors,
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
