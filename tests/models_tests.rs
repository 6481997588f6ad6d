//! Wire-format model tests

use bedrock_gateway::models::bedrock::{BedrockRequest, BedrockResponse, BedrockStreamEvent};
use bedrock_gateway::models::openai::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ModelList,
};

#[test]
fn test_minimal_chat_request_parses() {
    let json = r#"{
        "model": "claude-sonnet-4.5",
        "messages": [{"role": "user", "content": "hi"}]
    }"#;

    let request: ChatCompletionRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.model, "claude-sonnet-4.5");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.temperature, 1.0);
    assert!(!request.stream);
}

#[test]
fn test_full_chat_request_parses() {
    let json = r#"{
        "model": "claude-sonnet-4.5",
        "messages": [
            {"role": "system", "content": "be brief"},
            {"role": "user", "content": "hi"}
        ],
        "temperature": 0.3,
        "max_tokens": 512,
        "stream": true,
        "top_p": 0.95,
        "stop": ["\n\n"]
    }"#;

    let request: ChatCompletionRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.temperature, 0.3);
    assert_eq!(request.max_tokens, Some(512));
    assert!(request.stream);
    assert_eq!(request.top_p, Some(0.95));
    assert_eq!(request.stop.as_deref(), Some(&["\n\n".to_string()][..]));
}

#[test]
fn test_bedrock_request_wire_shape() {
    let request = BedrockRequest {
        anthropic_version: "bedrock-2023-05-31".to_string(),
        max_tokens: 4096,
        messages: vec![],
        temperature: 1.0,
        system: Some("be brief".to_string()),
        top_p: None,
        stop_sequences: None,
    };

    let value: serde_json::Value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["anthropic_version"], "bedrock-2023-05-31");
    assert_eq!(value["system"], "be brief");
    assert!(value.get("top_p").is_none());
    assert!(value.get("stop_sequences").is_none());
}

#[test]
fn test_completion_response_wire_shape() {
    let json = r#"{
        "id": "chatcmpl-abc",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "claude-sonnet-4.5",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "hello"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}
    }"#;

    let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();

    assert_eq!(response.choices[0].message.content, "hello");
    assert_eq!(response.usage.unwrap().total_tokens, 6);
}

#[test]
fn test_chunk_wire_shape_matches_openai_clients() {
    let json = r#"{
        "id": "chatcmpl-abc",
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "anthropic.claude-sonnet-4-5-20250929-v1:0",
        "choices": [{"index": 0, "delta": {"content": "x"}, "finish_reason": null}]
    }"#;

    let chunk: ChatCompletionChunk = serde_json::from_str(json).unwrap();

    assert_eq!(chunk.object, "chat.completion.chunk");
    assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("x"));
    assert!(chunk.choices[0].finish_reason.is_none());
}

#[test]
fn test_model_list_wire_shape() {
    let json = r#"{
        "object": "list",
        "data": [
            {"id": "anthropic.claude-sonnet-4-5-20250929-v1:0", "object": "model",
             "created": 1700000000, "owned_by": "anthropic"}
        ]
    }"#;

    let list: ModelList = serde_json::from_str(json).unwrap();

    assert_eq!(list.object, "list");
    assert_eq!(list.data[0].owned_by, "anthropic");
}

#[test]
fn test_bedrock_response_tolerates_missing_fields() {
    let response: BedrockResponse = serde_json::from_str("{}").unwrap();

    assert!(response.content.is_empty());
    assert!(response.usage.is_none());
    assert!(response.stop_reason.is_none());
}

#[test]
fn test_unrecognized_stream_event_is_inert() {
    let event: BedrockStreamEvent =
        serde_json::from_str(r#"{"type":"content_block_start","index":0}"#).unwrap();

    assert!(!event.is_message_stop());
    assert!(event.delta_text().is_none());
}
