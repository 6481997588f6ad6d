//! Logging utilities
//!
//! Shared helpers for keeping request logs readable

use crate::models::openai::ChatCompletionRequest;

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        let mut cut = max_len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... ({} chars truncated)", &s[..cut], s.len() - cut)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a chat request for debug logs
pub fn chat_request_summary(request: &ChatCompletionRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| {
            let max_len = if m.role == "system" { 100 } else { 200 };
            serde_json::json!({
                "role": m.role,
                "content": truncate_content(&m.content, max_len),
            })
        })
        .collect();

    serde_json::json!({
        "model": request.model,
        "messages": messages,
        "stream": request.stream,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    })
}
