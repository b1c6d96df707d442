//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `job` - Job request/response DTOs
//! - `error` - Common error response DTOs

mod error;
mod job;

pub use error::ErrorResponse;
pub use job::{CreateJobRequest, JobResponse};
