//! Request/response translation tests

use bedrock_gateway::config::ModelCatalog;
use bedrock_gateway::models::bedrock::{BedrockResponse, ANTHROPIC_VERSION};
use bedrock_gateway::models::openai::{ChatCompletionRequest, ChatMessage};
use bedrock_gateway::services::{ApiConverter, ModelMapper};

fn message(role: &str, content: &str) -> ChatMessage {
    ChatMessage {
        role: role.to_string(),
        content: content.to_string(),
    }
}

fn chat_request(model: &str, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: 1.0,
        max_tokens: None,
        stream: false,
        top_p: None,
        stop: None,
    }
}

#[test]
fn test_request_translation_defaults() {
    let converter = ApiConverter::new();
    let request = chat_request("claude-sonnet-4.5", vec![message("user", "hi")]);

    let bedrock = converter.convert_request(&request);

    assert_eq!(bedrock.anthropic_version, ANTHROPIC_VERSION);
    assert_eq!(bedrock.max_tokens, 4096);
    assert_eq!(bedrock.temperature, 1.0);
    assert!(bedrock.system.is_none());
    assert!(bedrock.top_p.is_none());
    assert!(bedrock.stop_sequences.is_none());
}

#[test]
fn test_system_messages_lifted_out_of_message_list() {
    let converter = ApiConverter::new();
    let request = chat_request(
        "claude-sonnet-4.5",
        vec![
            message("system", "Be brief."),
            message("user", "one"),
            message("assistant", "two"),
        ],
    );

    let bedrock = converter.convert_request(&request);

    assert_eq!(bedrock.system.as_deref(), Some("Be brief."));
    assert!(bedrock.messages.iter().all(|m| m.role != "system"));
    assert_eq!(bedrock.messages.len(), 2);
}

#[test]
fn test_full_translation_scenario() {
    // End-to-end check: claude-sonnet-4.5 request against a synthetic
    // provider response with 5 input / 1 output tokens
    let catalog = ModelCatalog::default();
    let mapper = ModelMapper::new(&catalog);
    let converter = ApiConverter::new();

    let request = chat_request("claude-sonnet-4.5", vec![message("user", "hi")]);

    let provider_model = mapper.map(&request.model);
    assert_eq!(provider_model, "anthropic.claude-sonnet-4-5-20250929-v1:0");

    let provider_response: BedrockResponse = serde_json::from_str(
        r#"{
            "content": [{"type": "text", "text": "hello"}],
            "usage": {"input_tokens": 5, "output_tokens": 1}
        }"#,
    )
    .unwrap();

    let completion = converter.convert_response(provider_response, &request.model);

    assert_eq!(completion.object, "chat.completion");
    assert_eq!(completion.model, "claude-sonnet-4.5");
    assert_eq!(completion.choices[0].message.content, "hello");
    assert_eq!(completion.choices[0].message.role, "assistant");
    assert_eq!(completion.usage.unwrap().total_tokens, 6);
}

#[test]
fn test_usage_total_is_sum_for_any_counts() {
    let converter = ApiConverter::new();

    for (input, output) in [(0u32, 0u32), (1, 0), (0, 1), (123, 456), (100_000, 1)] {
        let response: BedrockResponse = serde_json::from_str(&format!(
            r#"{{"content":[],"usage":{{"input_tokens":{},"output_tokens":{}}}}}"#,
            input, output
        ))
        .unwrap();

        let usage = converter
            .convert_response(response, "claude-sonnet-4.5")
            .usage
            .unwrap();

        assert_eq!(usage.prompt_tokens, input);
        assert_eq!(usage.completion_tokens, output);
        assert_eq!(usage.total_tokens, input + output);
    }
}

#[test]
fn test_mapper_idempotence_through_converter_flow() {
    let mapper = ModelMapper::new(&ModelCatalog::default());

    for name in ["claude-sonnet-4.5", "claude-haiku-4.5", "gpt-4", "nonsense"] {
        let mapped = mapper.map(name);
        assert!(mapped.contains("anthropic."));
        assert_eq!(mapper.map(&mapped), mapped);
    }
}

#[test]
fn test_unknown_roles_are_dropped_not_forwarded() {
    let converter = ApiConverter::new();
    let request = chat_request(
        "claude-sonnet-4.5",
        vec![message("user", "hi"), message("tool", "ignored")],
    );

    let bedrock = converter.convert_request(&request);
    assert_eq!(bedrock.messages.len(), 1);
}
