use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vitalog_domain::validation::FieldError;

/// Error response format for the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field failures for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    /// 422 response itemizing every failed field
    pub fn validation_error(errors: Vec<FieldError>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: "One or more fields failed validation".to_string(),
            details: Some(errors),
        }
    }

    /// 401 response with a short reason
    pub fn unauthenticated(reason: &str) -> Self {
        Self {
            error: "unauthenticated".to_string(),
            message: reason.to_string(),
            details: None,
        }
    }

    /// Generic 500 response; specifics stay in the logs
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "validation_error" => StatusCode::UNPROCESSABLE_ENTITY,
            "unauthenticated" => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_error_kind() {
        let cases = [
            (ErrorResponse::validation_error(Vec::new()), StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorResponse::unauthenticated("Token missing"), StatusCode::UNAUTHORIZED),
            (ErrorResponse::internal_error(), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (response, expected) in cases {
            assert_eq!(response.into_response().status(), expected);
        }
    }
}
