//! Error handling module
//!
//! Defines the gateway error taxonomy and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential resolution or verification failed
    #[error("No valid AWS credentials: {0}")]
    NoCredentials(String),

    /// Malformed client payload, rejected before any upstream call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider call failed (network or API-level)
    #[error("Bedrock request failed: {0}")]
    UpstreamFailure(String),

    /// Upstream failed mid-stream; surfaced as an in-band error frame
    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error body returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub detail: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFailure(_) | AppError::StreamInterrupted(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::NoCredentials(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this error is caused by the client rather than the gateway
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidRequest(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        } else {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
