//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod health;
pub mod models;

use crate::auth::Session;
use crate::config::{ModelCatalog, Settings};
use crate::middleware::request_logging;
use crate::monitoring::UsageTracker;
use crate::services::{ApiConverter, BedrockClient, ModelMapper};
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state, constructed once at startup and shared by reference
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub session: Session,
    pub mapper: ModelMapper,
    pub converter: ApiConverter,
    pub bedrock: BedrockClient,
    pub tracker: UsageTracker,
}

/// Create application router
pub fn create_router(settings: Settings, catalog: ModelCatalog, session: Session) -> Router {
    let bedrock = BedrockClient::new(&session, settings.request.timeout);
    let mapper = ModelMapper::new(&catalog);
    let converter = ApiConverter::new();
    let tracker = UsageTracker::new(catalog);

    let app_state = Arc::new(AppState {
        settings,
        session,
        mapper,
        converter,
        bedrock,
        tracker,
    });

    // Permissive CORS: the gateway fronts IDE clients on arbitrary origins
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/v1/models", get(models::list_models))
        .route("/v1/chat/completions", post(chat::chat_completions))
        .route("/v1/usage", get(chat::usage_report))
        .layer(axum::middleware::from_fn(request_logging))
        .with_state(app_state)
        .layer(middleware_stack)
}
