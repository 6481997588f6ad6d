//! Health check handlers
//!
//! Liveness at `/` and readiness (with a live upstream probe) at `/health`

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Service identity returned by the liveness endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
}

/// Readiness check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Upstream connectivity state (present when healthy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<String>,
    /// Probe failure description (present when unhealthy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness check
///
/// GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check with one live call to the Bedrock control plane
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    match state.bedrock.list_anthropic_models().await {
        Ok(_) => Json(HealthResponse {
            status: "healthy".to_string(),
            aws: Some("connected".to_string()),
            error: None,
        }),
        Err(e) => {
            error!("Health check failed: {}", e);
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                aws: None,
                error: Some(e.to_string()),
            })
        }
    }
}
