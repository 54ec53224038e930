//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::gateway::InferenceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input failed validation before any remote call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Agent with the given ID was not found
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Agent configuration is invalid
    #[error("Invalid agent configuration: {0}")]
    InvalidAgentConfig(String),

    /// Error occurred during registry persistence
    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::state::PersistenceError),

    /// A call to the inference provider failed; `step` names the operation
    /// that was in flight
    #[error("Inference call failed during {step}: {source}")]
    Inference {
        /// The operation that was running when the call failed
        step: &'static str,
        /// The underlying gateway error
        #[source]
        source: InferenceError,
    },

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidAgentConfig(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Inference {
                source: InferenceError::Timeout,
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Inference { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let response = AppError::Validation("prompt cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let error = AppError::Inference {
            step: "text generation",
            source: InferenceError::Timeout,
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_endpoint_error_maps_to_bad_gateway() {
        let error = AppError::Inference {
            step: "image generation",
            source: InferenceError::Endpoint {
                status: 503,
                body: "model loading".to_string(),
            },
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_message_names_the_failing_step() {
        let error = AppError::Inference {
            step: "speech synthesis",
            source: InferenceError::EmptyResponse,
        };
        assert!(error.to_string().contains("speech synthesis"));
    }
}
