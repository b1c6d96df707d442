//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn not_found(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("{} with {} '{}' not found", entity, field, value),
        )
        .with_details(serde_json::json!({
            "entity": entity,
            "field": field,
            "value": value,
        }))
    }

    pub fn validation(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("Invalid {}: {}", field, reason))
            .with_details(serde_json::json!({ "field": field, "reason": reason }))
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::new("BAD_REQUEST", "nope")).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "BAD_REQUEST", "message": "nope" }));
    }

    #[test]
    fn test_not_found_carries_lookup_details() {
        let error = ErrorResponse::not_found("Job", "id", "abc").with_request_id("req-1");
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "Job with id 'abc' not found");
        assert_eq!(error.details.unwrap()["value"], "abc");
        assert_eq!(error.request_id.as_deref(), Some("req-1"));
    }
}
