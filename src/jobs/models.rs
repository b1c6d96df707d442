use jiff::Timestamp;
use serde::Serialize;

use crate::jobs::error::{JobError, JobResult};
use crate::jobs::types::JobStatus;

// ============================================================================
// Job Models
// ============================================================================

/// A deferred job as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub description: String,
    pub execute_at: Timestamp,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A validated submission, before the store assigns identity.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub description: String,
    pub execute_at: Timestamp,
}

impl NewJob {
    /// Builds a submission, rejecting an execution time that is not strictly
    /// after `now`.
    pub fn new(description: impl Into<String>, execute_at: Timestamp, now: Timestamp) -> JobResult<Self> {
        if execute_at <= now {
            return Err(JobError::validation(
                "executeAt",
                "Execution time is in the past",
            ));
        }

        Ok(Self {
            description: description.into(),
            execute_at,
        })
    }
}

impl Job {
    pub(crate) fn from_new(id: String, new_job: NewJob, created_at: Timestamp) -> Self {
        Self {
            id,
            description: new_job.description,
            execute_at: new_job.execute_at,
            status: JobStatus::Scheduled,
            executed_at: None,
            created_at,
        }
    }

    /// A job the scheduler should trigger at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.status == JobStatus::Scheduled && self.execute_at <= now
    }

    /// Moves `scheduled → executing` and stamps `executed_at`.
    pub fn begin_execution(&mut self, now: Timestamp) -> JobResult<()> {
        self.transition(JobStatus::Executing, "run")?;
        self.executed_at = Some(now);
        Ok(())
    }

    /// Moves `executing → executed`.
    pub fn complete_execution(&mut self) -> JobResult<()> {
        self.transition(JobStatus::Executed, "completed")
    }

    /// Moves `scheduled → cancelled`.
    pub fn cancel(&mut self) -> JobResult<()> {
        self.transition(JobStatus::Cancelled, "cancelled")
    }

    fn transition(&mut self, next: JobStatus, operation: &'static str) -> JobResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(JobError::invalid_state(&self.id, self.status, operation));
        }
        self.status = next;
        Ok(())
    }
}
