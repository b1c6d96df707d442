//! Health check endpoint handlers.

use crate::api::doc::HEALTH_TAG;
use crate::jobs::JobStatus;
use crate::state::AppState;
use axum::{Json, extract::State};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: Timestamp,
    /// Whether the scheduler loop is scanning for due jobs
    pub scheduler_running: bool,
    pub jobs: JobCounts,
}

/// Number of jobs held per status.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct JobCounts {
    pub total: usize,
    pub scheduled: usize,
    pub executing: usize,
    pub cancelled: usize,
}

/// Creates health check routes.
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// GET /health - Liveness check with job counts
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.services.jobs.store().count_by_status().await;
    let count = |status: JobStatus| counts.get(&status).copied().unwrap_or(0);
    let scheduler_running = match &state.scheduler {
        Some(scheduler) => scheduler.is_running().await,
        None => false,
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::pkg_version().to_string(),
        timestamp: Timestamp::now(),
        scheduler_running,
        jobs: JobCounts {
            total: counts.values().sum(),
            scheduled: count(JobStatus::Scheduled),
            executing: count(JobStatus::Executing),
            cancelled: count(JobStatus::Cancelled),
        },
    })
}
