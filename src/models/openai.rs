//! OpenAI-compatible API data models
//!
//! Defines the chat-completions request and response structures the gateway exposes

use serde::{Deserialize, Serialize};

fn default_temperature() -> f32 {
    1.0
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

/// Chat completion request (OpenAI format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature, 0.0..=2.0
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
    /// Top-p parameter (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Stop sequences (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// Chat completion response (OpenAI format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    pub id: String,
    /// Object type, always "chat.completion"
    pub object: String,
    /// Creation timestamp (unix seconds)
    pub created: i64,
    /// Model identifier echoed back to the client
    pub model: String,
    /// Choice list
    pub choices: Vec<ChatChoice>,
    /// Usage statistics (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ChatUsage>,
}

/// Completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Choice index
    pub index: u32,
    /// Assistant message
    pub message: ChatMessage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUsage {
    /// Prompt token count
    pub prompt_tokens: u32,
    /// Completion token count
    pub completion_tokens: u32,
    /// Total token count
    pub total_tokens: u32,
}

/// Streaming chat completion chunk (OpenAI format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    /// Stream ID, stable for the whole stream
    pub id: String,
    /// Object type, always "chat.completion.chunk"
    pub object: String,
    /// Creation timestamp (unix seconds)
    pub created: i64,
    /// Model identifier
    pub model: String,
    /// Choice list
    pub choices: Vec<ChunkChoice>,
}

/// Streaming choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    /// Choice index
    pub index: u32,
    /// Delta content
    pub delta: ChunkDelta,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Streaming delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    /// Incremental content fragment (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Model listing (OpenAI format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    /// Object type, always "list"
    pub object: String,
    /// Available models
    pub data: Vec<ModelInfo>,
}

/// Model descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier
    pub id: String,
    /// Object type, always "model"
    pub object: String,
    /// Creation timestamp (unix seconds)
    pub created: i64,
    /// Owning organization
    pub owned_by: String,
}

impl ChatCompletionRequest {
    /// Collect the text of all system messages, in order
    pub fn system_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let json = r#"{"model":"claude-sonnet-4.5","messages":[{"role":"user","content":"hi"}]}"#;
        let request: ChatCompletionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.temperature, 1.0);
        assert!(!request.stream);
        assert!(request.max_tokens.is_none());
        assert!(request.stop.is_none());
    }

    #[test]
    fn test_request_round_trip() {
        let request = ChatCompletionRequest {
            model: "claude-sonnet-4.5".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Hello".to_string(),
            }],
            temperature: 0.7,
            max_tokens: Some(256),
            stream: true,
            top_p: Some(0.9),
            stop: Some(vec!["END".to_string()]),
        };

        let json = serde_json::to_string(&request).unwrap();
        let deserialized: ChatCompletionRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request.model, deserialized.model);
        assert_eq!(request.max_tokens, deserialized.max_tokens);
        assert_eq!(request.stop, deserialized.stop);
    }

    #[test]
    fn test_system_messages_in_order() {
        let request = ChatCompletionRequest {
            model: "claude-sonnet-4.5".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "first".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "hi".to_string(),
                },
                ChatMessage {
                    role: "system".to_string(),
                    content: "second".to_string(),
                },
            ],
            temperature: 1.0,
            max_tokens: None,
            stream: false,
            top_p: None,
            stop: None,
        };

        assert_eq!(request.system_messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_chunk_serialization_omits_empty_content() {
        let chunk = ChatCompletionChunk {
            id: "chatcmpl-test".to_string(),
            object: "chat.completion.chunk".to_string(),
            created: 1_700_000_000,
            model: "anthropic.claude-sonnet-4-5-20250929-v1:0".to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkDelta { content: None },
                finish_reason: None,
            }],
        };

        let json = serde_json::to_string(&chunk).unwrap();
        assert!(!json.contains("\"content\""));
        assert!(json.contains("\"finish_reason\":null"));
    }
}
