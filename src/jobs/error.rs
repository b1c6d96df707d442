use thiserror::Error;

use crate::jobs::types::JobStatus;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Job {id} cannot be {operation} while {status}")]
    InvalidState {
        id: String,
        status: JobStatus,
        operation: &'static str,
    },

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl JobError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_state(id: impl Into<String>, status: JobStatus, operation: &'static str) -> Self {
        Self::InvalidState {
            id: id.into(),
            status,
            operation,
        }
    }

    /// Errors that mean the job moved on between a scan and a trigger.
    pub fn is_race(&self) -> bool {
        matches!(self, JobError::NotFound(_) | JobError::InvalidState { .. })
    }
}

pub type JobResult<T> = Result<T, JobError>;
