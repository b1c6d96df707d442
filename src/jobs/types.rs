use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a deferred job.
///
/// ```text
/// scheduled ──► executing ──► executed ──► (removed)
///     │
///     └───────► cancelled
/// ```
///
/// `executed` and `cancelled` are terminal. An executed job is dropped from
/// the store as part of the same execution sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Scheduled,
    Executing,
    Executed,
    Cancelled,
}

impl JobStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Scheduled,
        JobStatus::Executing,
        JobStatus::Executed,
        JobStatus::Cancelled,
    ];

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Scheduled, JobStatus::Executing)
                | (JobStatus::Executing, JobStatus::Executed)
                | (JobStatus::Scheduled, JobStatus::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Executed | JobStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Scheduled => "scheduled",
            JobStatus::Executing => "executing",
            JobStatus::Executed => "executed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
