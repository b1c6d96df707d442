//! Job request/response DTOs.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::jobs::{Job, JobStatus};

/// Request body for submitting a job.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    /// What the job does
    #[validate(length(min = 1, max = 1024, message = "must be 1 to 1024 characters"))]
    #[schema(example = "Send weekly report")]
    pub description: String,

    /// When the job should run (RFC 3339), must be in the future
    #[schema(value_type = String, format = DateTime, example = "2030-01-01T12:00:00Z")]
    pub execute_at: Timestamp,
}

/// Job as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub description: String,
    #[schema(value_type = String, format = DateTime)]
    pub execute_at: Timestamp,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub executed_at: Option<Timestamp>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            description: job.description,
            execute_at: job.execute_at,
            status: job.status,
            executed_at: job.executed_at,
            created_at: job.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_uses_camel_case() {
        let req: CreateJobRequest = serde_json::from_str(
            r#"{"description":"backup","executeAt":"2030-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.description, "backup");
        assert_eq!(req.execute_at, "2030-01-01T00:00:00Z".parse::<Timestamp>().unwrap());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_and_long_descriptions() {
        let at: Timestamp = "2030-01-01T00:00:00Z".parse().unwrap();
        let empty = CreateJobRequest {
            description: String::new(),
            execute_at: at,
        };
        assert!(empty.validate().is_err());

        let long = CreateJobRequest {
            description: "x".repeat(1025),
            execute_at: at,
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_response_omits_executed_at_until_set() {
        let at: Timestamp = "2030-01-01T00:00:00Z".parse().unwrap();
        let response = JobResponse {
            id: "abc".to_string(),
            description: "backup".to_string(),
            execute_at: at,
            status: JobStatus::Scheduled,
            executed_at: None,
            created_at: at,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["executeAt"], "2030-01-01T00:00:00Z");
        assert!(json.get("executedAt").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
