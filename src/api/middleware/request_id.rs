//! Request ID middleware for request tracing.
//!
//! Every request gets an identifier, taken from the `x-request-id` header or
//! generated as a UUID v4, and echoed back on the response.

use axum::{
    Json,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::dto::ErrorResponse;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID stored in request extensions for downstream access.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Middleware that ensures every request has a unique request ID.
///
/// Error bodies rendered from `AppError` get the ID filled into their
/// `request_id` field.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let response = next.run(request).await;

    let mut response = match response.extensions().get::<ErrorResponse>().cloned() {
        Some(error) => {
            let status = response.status();
            (status, Json(error.with_request_id(&request_id))).into_response()
        }
        None => response,
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
