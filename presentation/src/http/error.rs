//! Error-to-status mapping for the HTTP surface
//!
//! Every failure class keeps a distinguishable status code: validation is
//! 400, an exhausted candidate list or empty content is 502, everything
//! else is 500. Nothing is collapsed into a generic error.

use crate::http::dto::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use explainer_application::{ExplainError, OrchestratorError, VisualizeError};
use thiserror::Error;

/// Gateway-level error with one status code per class
#[derive(Error, Debug)]
pub enum ApiError {
    /// 400 — inbound contract violation; never retried.
    #[error("{0}")]
    Validation(String),

    /// 502 — no upstream endpoint produced usable content.
    #[error("{0}")]
    BadUpstream(String),

    /// 500 — internal wiring or unexpected upstream failure.
    #[error("{0}")]
    Internal(String),
}

impl From<ExplainError> for ApiError {
    fn from(error: ExplainError) -> Self {
        let message = error.to_string();
        match error {
            ExplainError::Invalid(_) => ApiError::Validation(message),
            ExplainError::Upstream(OrchestratorError::AllEndpointsExhausted { .. })
            | ExplainError::EmptyContent => ApiError::BadUpstream(message),
            ExplainError::Upstream(OrchestratorError::NoCandidates) => {
                ApiError::Internal(message)
            }
        }
    }
}

impl From<VisualizeError> for ApiError {
    fn from(error: VisualizeError) -> Self {
        let message = error.to_string();
        match error {
            VisualizeError::Invalid(_) => ApiError::Validation(message),
            VisualizeError::Upstream(OrchestratorError::AllEndpointsExhausted { .. })
            | VisualizeError::EmptyContent => ApiError::BadUpstream(message),
            VisualizeError::Upstream(OrchestratorError::NoCandidates) => {
                ApiError::Internal(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Validation puts the reason directly in `error`, matching
            // what the frontend shows inline.
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    message: None,
                },
            ),
            ApiError::BadUpstream(message) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    error: "AI error".to_string(),
                    message: Some(message),
                },
            ),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal error".to_string(),
                    message: Some(message),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
