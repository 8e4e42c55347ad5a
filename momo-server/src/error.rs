//! Error types for momo-server
//!
//! Only invalid requests and internal failures become HTTP errors.
//! Provider failures are answered with fallback values and HTTP 200, except
//! speech synthesis, which has no fallback.

use crate::services::ProviderError;
use crate::workflow::WorkflowError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A provider without a fallback failed (500)
    #[error("{service} failed: {source}")]
    Provider {
        service: &'static str,
        #[source]
        source: ProviderError,
    },

    /// Pipeline failure (500)
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, service) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Provider { service, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROVIDER_ERROR",
                source.to_string(),
                Some(service),
            ),
            ApiError::Workflow(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "WORKFLOW_ERROR",
                err.to_string(),
                None,
            ),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, None)
            }
        };

        let mut body = json!({
            "status": "error",
            "message": message,
            "error": {
                "code": error_code,
                "message": message,
            }
        });
        if let Some(service) = service {
            body["service"] = json!(service);
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
