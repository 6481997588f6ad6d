//! Bedrock API data models
//!
//! Request and response structures for the Anthropic messages format used by
//! Bedrock's invoke-model endpoints, including the streaming event payloads.

use serde::{Deserialize, Serialize};

/// Anthropic API version accepted by Bedrock
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Bedrock invoke-model request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockRequest {
    /// API version marker, always [`ANTHROPIC_VERSION`]
    pub anthropic_version: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Conversation messages (user/assistant only)
    pub messages: Vec<BedrockMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Top-p parameter (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Stop sequences (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// Bedrock conversation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockMessage {
    /// Role (user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

/// Bedrock invoke-model response body
#[derive(Debug, Clone, Deserialize)]
pub struct BedrockResponse {
    /// Content blocks
    #[serde(default)]
    pub content: Vec<BedrockContentBlock>,
    /// Stop reason reported by the model
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<BedrockUsage>,
}

/// Content block within a Bedrock response
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BedrockContentBlock {
    /// Text block
    #[serde(rename = "text")]
    Text { text: String },
    /// Any block type this gateway does not translate
    #[serde(other)]
    Unknown,
}

/// Token usage reported by Bedrock
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedrockUsage {
    /// Input token count
    #[serde(default)]
    pub input_tokens: u32,
    /// Output token count
    #[serde(default)]
    pub output_tokens: u32,
}

/// One decoded event from a Bedrock response stream.
///
/// The stream interleaves several event shapes (message_start,
/// content_block_delta, message_delta, message_stop); this struct is lenient
/// and keeps only the fields the translator consumes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedrockStreamEvent {
    /// Event type marker
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    /// Delta payload (content_block_delta / message_delta)
    #[serde(default)]
    pub delta: Option<BedrockStreamDelta>,
    /// Message envelope (message_start)
    #[serde(default)]
    pub message: Option<BedrockStreamMessage>,
    /// Usage attached to message_delta events
    #[serde(default)]
    pub usage: Option<BedrockUsage>,
}

/// Delta payload within a stream event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedrockStreamDelta {
    /// Delta type marker
    #[serde(rename = "type", default)]
    pub delta_type: Option<String>,
    /// Text fragment
    #[serde(default)]
    pub text: Option<String>,
    /// Stop reason (message_delta)
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Message envelope carried by message_start events
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedrockStreamMessage {
    /// Usage snapshot (input tokens are known at message start)
    #[serde(default)]
    pub usage: Option<BedrockUsage>,
}

impl BedrockStreamEvent {
    /// Text fragment carried by this event, if any
    pub fn delta_text(&self) -> Option<&str> {
        self.delta.as_ref().and_then(|d| d.text.as_deref())
    }

    /// Whether this event ends the message
    pub fn is_message_stop(&self) -> bool {
        self.event_type.as_deref() == Some("message_stop")
    }
}
