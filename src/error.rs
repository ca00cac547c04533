//! Error types for blocktutor
//!
//! Caller mistakes surface as 400 with a descriptive message; upstream
//! provider failures surface as 500 with a fixed user-safe message plus
//! diagnostic fields. Completion parse failures are not errors at all -
//! the handlers map them to a soft 200 (see `api`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::services::UpstreamError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller supplied insufficient input (400)
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Caller supplied malformed input (400)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Inference provider call failed (500); `user_message` is the fixed
    /// string shown to callers, the source carries diagnostics
    #[error("{user_message}")]
    Upstream {
        user_message: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    /// Status code and JSON body for this error
    pub fn response_parts(&self) -> (StatusCode, Value) {
        match self {
            ApiError::MissingInput(msg) | ApiError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            ApiError::Upstream {
                user_message,
                source,
            } => {
                let mut body = serde_json::Map::new();
                body.insert("error".to_string(), json!(user_message));
                body.insert("message".to_string(), json!(source.to_string()));
                if let Some(status) = source.status() {
                    body.insert("status".to_string(), json!(status));
                }
                if let Some(error_type) = source.error_type() {
                    body.insert("type".to_string(), json!(error_type));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Value::Object(body))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream { source, .. } = &self {
            tracing::error!(error = %source, "model provider call failed");
        }
        let (status, body) = self.response_parts();
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_maps_to_400() {
        let err = ApiError::MissingInput("no image uploaded".to_string());
        let (status, body) = err.response_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "no image uploaded");
    }

    #[test]
    fn test_upstream_maps_to_500_with_diagnostics() {
        let err = ApiError::Upstream {
            user_message: "failed to generate study material",
            source: UpstreamError::Api {
                status: 429,
                message: "Rate limit reached".to_string(),
                error_type: Some("requests".to_string()),
            },
        };
        let (status, body) = err.response_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to generate study material");
        assert_eq!(body["status"], 429);
        assert_eq!(body["type"], "requests");
        assert!(body["message"].as_str().unwrap().contains("Rate limit reached"));
    }

    #[test]
    fn test_network_upstream_omits_status_and_type() {
        let err = ApiError::Upstream {
            user_message: "failed to generate chat response",
            source: UpstreamError::Network("connection refused".to_string()),
        };
        let (_, body) = err.response_parts();
        assert!(body.get("status").is_none());
        assert!(body.get("type").is_none());
        assert_eq!(body["error"], "failed to generate chat response");
    }
}
