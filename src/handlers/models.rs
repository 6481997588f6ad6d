//! Model listing handler
//!
//! Exposes the region's Anthropic models in OpenAI list format

use crate::handlers::AppState;
use crate::models::openai::{ModelInfo, ModelList};
use crate::utils::error::AppResult;
use axum::{extract::State, response::Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::error;

/// List available models
///
/// GET /v1/models
pub async fn list_models(State(state): State<Arc<AppState>>) -> AppResult<Json<ModelList>> {
    let ids = state.bedrock.list_anthropic_models().await.map_err(|e| {
        error!("Error listing models: {}", e);
        e
    })?;

    let created = Utc::now().timestamp();
    let data = ids
        .into_iter()
        .map(|id| ModelInfo {
            id,
            object: "model".to_string(),
            created,
            owned_by: "anthropic".to_string(),
        })
        .collect();

    Ok(Json(ModelList {
        object: "list".to_string(),
        data,
    }))
}
