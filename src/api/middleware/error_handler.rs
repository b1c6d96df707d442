//! Error handler for converting AppError to HTTP responses.
//!
//! Every error body is an `ErrorResponse`. The rendered `ErrorResponse` is also
//! stored in the response extensions so the request ID middleware can stamp
//! the request ID onto it.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Validation, ValidationErrors → 400 BAD_REQUEST
    /// - InvalidState → 400 BAD_REQUEST
    /// - InvalidJson, BadRequest → 400 BAD_REQUEST
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let error_response = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::not_found(entity, field, value),
            AppError::Validation { field, reason } => ErrorResponse::validation(field, reason),
            AppError::ValidationErrors { errors } => {
                let errors: Vec<_> = errors
                    .iter()
                    .map(|e| json!({ "field": e.field, "message": e.message }))
                    .collect();
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                    .with_details(json!({ "errors": errors }))
            }
            AppError::InvalidState { message } => ErrorResponse::new("INVALID_STATE", message),
            AppError::InvalidJson { message } => {
                ErrorResponse::new("INVALID_JSON", "Invalid JSON request body")
                    .with_details(json!({ "error": message }))
            }
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error while handling request");
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        };

        let mut response = (status, Json(error_response.clone())).into_response();
        response.extensions_mut().insert(error_response);
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::InvalidJson {
                message: err.body_text(),
            },
            JsonRejection::JsonSyntaxError(err) => AppError::InvalidJson {
                message: err.body_text(),
            },
            JsonRejection::MissingJsonContentType(_) => AppError::BadRequest {
                message: "Missing or invalid Content-Type header, expected application/json"
                    .to_string(),
            },
            other => AppError::BadRequest {
                message: other.body_text(),
            },
        }
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::InvalidState { .. }
        | AppError::InvalidJson { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use http_body_util::BodyExt;

    async fn render(error: AppError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_renders_404() {
        let (status, body) = render(AppError::NotFound {
            entity: "Job".to_string(),
            field: "id".to_string(),
            value: "abc".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
        assert!(body.message.contains("abc"));
    }

    #[tokio::test]
    async fn test_invalid_state_renders_400() {
        let (status, body) = render(AppError::InvalidState {
            message: "job abc is cancelled".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_STATE");
        assert_eq!(body.message, "job abc is cancelled");
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let (status, body) = render(AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "description".to_string(),
                message: "too long".to_string(),
            }],
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert_eq!(details["errors"][0]["field"], "description");
    }

    #[tokio::test]
    async fn test_internal_error_hides_source() {
        let (status, body) = render(AppError::from(anyhow::anyhow!("secret detail"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("secret"));
    }

    #[tokio::test]
    async fn test_scheduler_failure_renders_500() {
        let error = crate::jobs::JobError::Scheduler("execution task panicked".to_string());
        let (status, body) = render(AppError::from(error)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("panicked"));
    }

    #[test]
    fn test_error_response_is_kept_in_extensions() {
        let response = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();

        let stored = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(stored.code, "BAD_REQUEST");
    }
}
