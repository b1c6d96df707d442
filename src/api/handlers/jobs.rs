//! Job request handlers.

use crate::api::doc::JOB_TAG;
use crate::api::dto::{CreateJobRequest, ErrorResponse, JobResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates job-related routes.
pub fn job_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_jobs, create_job))
        .routes(routes!(get_job, cancel_job))
        .routes(routes!(run_job))
}

/// GET /api/jobs - List all live jobs
#[utoipa::path(
    get,
    path = "/",
    tag = JOB_TAG,
    responses(
        (status = 200, description = "All jobs currently held", body = Vec<JobResponse>)
    )
)]
async fn list_jobs(State(state): State<AppState>) -> Json<Vec<JobResponse>> {
    let jobs = state.services.jobs.list_all().await;
    Json(jobs.into_iter().map(JobResponse::from).collect())
}

/// POST /api/jobs - Submit a job for deferred execution
#[utoipa::path(
    post,
    path = "/",
    tag = JOB_TAG,
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job scheduled", body = JobResponse),
        (status = 400, description = "Invalid request or execution time not in the future", body = ErrorResponse)
    )
)]
async fn create_job(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> AppResult<(StatusCode, Json<JobResponse>)> {
    let job = state
        .services
        .jobs
        .submit(req.description, req.execute_at)
        .await?;

    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

/// GET /api/jobs/{id} - Get job by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = JOB_TAG,
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobResponse>> {
    let job = state.services.jobs.get(&id).await?;
    Ok(Json(JobResponse::from(job)))
}

/// DELETE /api/jobs/{id} - Cancel a scheduled job
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = JOB_TAG,
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job cancelled", body = JobResponse),
        (status = 400, description = "Job is not scheduled", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobResponse>> {
    let job = state.services.jobs.cancel(&id).await?;
    Ok(Json(JobResponse::from(job)))
}

/// POST /api/jobs/{id}/run - Run a scheduled job immediately
///
/// Responds once execution has finished.
#[utoipa::path(
    post,
    path = "/{id}/run",
    tag = JOB_TAG,
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job executed", body = JobResponse),
        (status = 400, description = "Job is not scheduled", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
async fn run_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobResponse>> {
    let job = state.services.jobs.run_now(&id).await?;
    Ok(Json(JobResponse::from(job)))
}
