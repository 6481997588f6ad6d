//! Bedrock Gateway Library
//!
//! OpenAI-compatible chat-completions surface over AWS Bedrock

pub mod auth;
pub mod config;
pub mod handlers;
pub mod linear;
pub mod middleware;
pub mod models;
pub mod monitoring;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{AuthMethod, CredentialResolver, Session};
pub use config::{ModelCatalog, Settings};
pub use handlers::{create_router, AppState};
pub use monitoring::UsageTracker;
pub use services::{ApiConverter, BedrockClient, ModelMapper, StreamFrame, StreamTranslator};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
