//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Path the generated OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Path of the interactive Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS
/// 2. Request ID middleware - generates/propagates request IDs
/// 3. Logging middleware - logs requests with request IDs
/// 4. Request timeout
///
/// # Routes
/// - `/api/jobs` - Job scheduling operations
/// - `/health` - Liveness and job counts
/// - `/api-docs/openapi.json` - OpenAPI document
/// - `/swagger-ui` - Swagger UI over that document
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/jobs", handlers::jobs::job_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, api))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{ErrorResponse, JobResponse};
    use crate::api::handlers::health::HealthResponse;
    use crate::jobs::{JobExecutor, JobStatus, JobStore};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use jiff::{SignedDuration, Timestamp};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn app() -> Router {
        let store = JobStore::new();
        let executor = JobExecutor::with_delay(store.clone(), Duration::from_millis(20));
        create_router(
            AppState::new(store, executor, None),
            Duration::from_secs(10),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).unwrap()
    }

    fn create_body(description: &str, execute_at: Timestamp) -> Option<String> {
        Some(
            serde_json::json!({ "description": description, "executeAt": execute_at.to_string() })
                .to_string(),
        )
    }

    async fn create_job(app: &Router) -> JobResponse {
        let at = Timestamp::now() + SignedDuration::from_secs(3600);
        let (status, bytes) = send(app, Method::POST, "/api/jobs", create_body("backup", at)).await;
        assert_eq!(status, StatusCode::CREATED);
        parse(&bytes)
    }

    #[tokio::test]
    async fn test_create_then_get_and_list() {
        let app = app();
        let job = create_job(&app).await;
        assert_eq!(job.status, JobStatus::Scheduled);
        assert_eq!(job.description, "backup");

        let (status, bytes) = send(&app, Method::GET, &format!("/api/jobs/{}", job.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<JobResponse>(&bytes), job);

        let (status, bytes) = send(&app, Method::GET, "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<Vec<JobResponse>>(&bytes), vec![job]);
    }

    #[tokio::test]
    async fn test_create_in_past_is_rejected() {
        let app = app();
        let at = Timestamp::now() - SignedDuration::from_secs(60);
        let (status, bytes) = send(&app, Method::POST, "/api/jobs", create_body("late", at)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = parse(&bytes);
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.request_id.is_some());
    }

    #[tokio::test]
    async fn test_create_with_empty_description_is_rejected() {
        let app = app();
        let at = Timestamp::now() + SignedDuration::from_secs(60);
        let (status, bytes) = send(&app, Method::POST, "/api/jobs", create_body("", at)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse::<ErrorResponse>(&bytes).code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let app = app();
        let (status, bytes) =
            send(&app, Method::POST, "/api/jobs", Some("{\"description\":".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse::<ErrorResponse>(&bytes).code, "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let app = app();
        for (method, uri) in [
            (Method::GET, "/api/jobs/missing"),
            (Method::DELETE, "/api/jobs/missing"),
            (Method::POST, "/api/jobs/missing/run"),
        ] {
            let (status, bytes) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(parse::<ErrorResponse>(&bytes).code, "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_cancel_then_run_is_invalid_state() {
        let app = app();
        let job = create_job(&app).await;

        let (status, bytes) = send(&app, Method::DELETE, &format!("/api/jobs/{}", job.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<JobResponse>(&bytes).status, JobStatus::Cancelled);

        let (status, bytes) =
            send(&app, Method::POST, &format!("/api/jobs/{}/run", job.id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse::<ErrorResponse>(&bytes).code, "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_run_now_executes_and_removes() {
        let app = app();
        let job = create_job(&app).await;

        let (status, bytes) =
            send(&app, Method::POST, &format!("/api/jobs/{}/run", job.id), None).await;
        assert_eq!(status, StatusCode::OK);
        let executed: JobResponse = parse(&bytes);
        assert_eq!(executed.status, JobStatus::Executed);
        assert!(executed.executed_at.is_some());

        let (status, _) = send(&app, Method::GET, &format!("/api/jobs/{}", job.id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_job_counts() {
        let app = app();
        create_job(&app).await;
        create_job(&app).await;

        let (status, bytes) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = parse(&bytes);
        assert_eq!(health.status, "ok");
        assert_eq!(health.jobs.total, 2);
        assert_eq!(health.jobs.scheduled, 2);
        assert!(!health.scheduler_running);
    }

    #[tokio::test]
    async fn test_openapi_document_lists_job_paths() {
        let app = app();
        let (status, bytes) = send(&app, Method::GET, OPENAPI_PATH, None).await;
        assert_eq!(status, StatusCode::OK);

        let doc: serde_json::Value = parse(&bytes);
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/jobs") || paths.contains_key("/api/jobs/"));
        assert!(paths.contains_key("/api/jobs/{id}"));
        assert!(paths.contains_key("/api/jobs/{id}/run"));
        assert!(paths.contains_key("/health"));
    }

    #[tokio::test]
    async fn test_swagger_ui_is_served() {
        let app = app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("{SWAGGER_UI_PATH}/"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }
}
