//! Bedrock Gateway Server
//!
//! HTTP gateway that exposes an OpenAI-compatible chat-completions API and
//! forwards requests to AWS Bedrock, translating payloads and streaming
//! formats in both directions

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod auth;
mod config;
mod handlers;
mod linear;
mod middleware;
mod models;
mod monitoring;
mod services;
mod utils;

use auth::CredentialResolver;
use config::{ModelCatalog, Settings};
use handlers::create_router;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "bedrock-gateway", version, about = "OpenAI-compatible gateway for AWS Bedrock")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(long, env = "GATEWAY_PORT", default_value_t = 8000)]
    port: u16,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    let args = Args::parse();

    // Load settings from environment, then let CLI arguments win
    let mut settings = Settings::new().context("Failed to load server settings")?;
    settings.server.host = args.host;
    settings.server.port = args.port;
    settings.aws.region = args.region;

    info!("Server settings loaded");
    info!("AWS region: {}", settings.aws.region);

    // Load model alias/pricing catalog
    let catalog = ModelCatalog::load_default().context("Failed to load model catalog")?;
    info!("Model catalog loaded");

    // Resolve and verify credentials exactly once, before the listener binds
    let resolver = CredentialResolver::new(settings.aws.region.clone());
    let session = resolver
        .resolve(None)
        .await
        .context("Failed to resolve AWS credentials")?;

    // Create router
    let app = create_router(settings.clone(), catalog, session);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Bedrock gateway started on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Chat endpoint: http://{}/v1/chat/completions", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging() {
    // Get log level from environment variable, default to info
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Check if JSON format should be used
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}
