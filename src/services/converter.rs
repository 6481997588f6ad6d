//! API converter service
//!
//! Translates between the OpenAI-compatible surface and the Bedrock
//! Anthropic-messages format

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::bedrock::{
    BedrockContentBlock, BedrockMessage, BedrockRequest, BedrockResponse, ANTHROPIC_VERSION,
};
use crate::models::openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatUsage,
};

/// Maximum tokens applied when the client omits max_tokens
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// API converter
#[derive(Debug, Clone, Default)]
pub struct ApiConverter;

impl ApiConverter {
    /// Create a new converter instance
    pub fn new() -> Self {
        Self
    }

    /// Convert an OpenAI-format chat request to the Bedrock request envelope.
    ///
    /// System messages are lifted into the top-level `system` field; when the
    /// client sends several, the last one wins. User/assistant messages keep
    /// their role, content, and relative order.
    pub fn convert_request(&self, request: &ChatCompletionRequest) -> BedrockRequest {
        debug!("Converting chat request to Bedrock format");

        let system = request
            .system_messages()
            .last()
            .copied()
            .map(str::to_string);

        let messages = request
            .messages
            .iter()
            .filter(|m| matches!(m.role.as_str(), "user" | "assistant"))
            .map(|m| BedrockMessage {
                role: m.role.clone(),
                content: m.content.clone(),
            })
            .collect();

        BedrockRequest {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages,
            temperature: request.temperature,
            system,
            top_p: request.top_p,
            stop_sequences: request.stop.clone(),
        }
    }

    /// Convert a complete Bedrock response to OpenAI format.
    ///
    /// Text content blocks are concatenated in order into one assistant
    /// message. finish_reason is always "stop"; Bedrock stop reasons are not
    /// mapped.
    pub fn convert_response(
        &self,
        response: BedrockResponse,
        client_model: &str,
    ) -> ChatCompletionResponse {
        let mut content = String::new();
        for block in &response.content {
            if let BedrockContentBlock::Text { text } = block {
                content.push_str(text);
            }
        }

        let usage = response.usage.unwrap_or_default();
        let prompt_tokens = usage.input_tokens;
        let completion_tokens = usage.output_tokens;

        debug!(
            "Converted Bedrock response: model={}, tokens={}+{}",
            client_model, prompt_tokens, completion_tokens
        );

        ChatCompletionResponse {
            id: format!("chatcmpl-{}", Uuid::new_v4().simple()),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: client_model.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(ChatUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }),
        }
    }
}
