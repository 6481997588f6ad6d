//! Chat completion handlers
//!
//! Translates OpenAI-format chat requests into Bedrock calls and streams or
//! returns the translated result, recording token usage as totals become
//! known

use crate::handlers::AppState;
use crate::models::bedrock::BedrockRequest;
use crate::models::openai::ChatCompletionRequest;
use crate::monitoring::{CostSummary, UsageSummary};
use crate::services::StreamTranslator;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::chat_request_summary;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

/// Handle chat completion requests
///
/// POST /v1/chat/completions
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatCompletionRequest>,
) -> AppResult<Response> {
    debug!("Received chat completion request for model: {}", request.model);

    if let Ok(summary) = serde_json::to_string(&chat_request_summary(&request)) {
        debug!("Client request: {}", summary);
    }

    validate_chat_request(&request).map_err(AppError::InvalidRequest)?;

    let provider_model = state.mapper.map(&request.model);
    let bedrock_request = state.converter.convert_request(&request);

    if request.stream {
        handle_stream_request(state, provider_model, bedrock_request).await
    } else {
        handle_normal_request(state, provider_model, request.model, bedrock_request).await
    }
}

/// Handle normal (non-streaming) requests
async fn handle_normal_request(
    state: Arc<AppState>,
    provider_model: String,
    client_model: String,
    bedrock_request: BedrockRequest,
) -> AppResult<Response> {
    debug!("Handling normal request for model: {}", provider_model);

    let response = state
        .bedrock
        .invoke(&provider_model, &bedrock_request)
        .await
        .map_err(|e| {
            error!(
                "Bedrock request failed: model={}, streaming=false: {}",
                provider_model, e
            );
            e
        })?;

    let completion = state.converter.convert_response(response, &client_model);

    if let Some(usage) = &completion.usage {
        state.tracker.record(
            &provider_model,
            u64::from(usage.prompt_tokens),
            u64::from(usage.completion_tokens),
        );
    }

    Ok(Json(completion).into_response())
}

/// Handle streaming requests
///
/// The translator state machine runs in a spawned task; each frame it yields
/// is written to the client immediately through the SSE channel. A failed
/// send means the client disconnected, which stops consumption of the
/// upstream event stream on the spot.
async fn handle_stream_request(
    state: Arc<AppState>,
    provider_model: String,
    bedrock_request: BedrockRequest,
) -> AppResult<Response> {
    debug!("Handling streaming request for model: {}", provider_model);

    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, axum::Error>>(100);

    tokio::spawn(async move {
        let mut translator = StreamTranslator::new(&provider_model);

        // A failed invoke never enters streaming: one error frame, then done
        let mut stream = match state
            .bedrock
            .invoke_stream(&provider_model, &bedrock_request)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                error!(
                    "Bedrock request failed: model={}, streaming=true: {}",
                    provider_model, e
                );
                if let Some(frame) = translator.on_error(&e.to_string()) {
                    let _ = tx.send(Ok(Event::default().data(frame.sse_data()))).await;
                }
                return;
            }
        };

        loop {
            match stream.next().await {
                Ok(Some(event)) => {
                    for frame in translator.on_event(&event) {
                        if tx
                            .send(Ok(Event::default().data(frame.sse_data())))
                            .await
                            .is_err()
                        {
                            debug!("Client disconnected");
                            return;
                        }
                    }

                    if translator.is_done() {
                        break;
                    }
                }
                // Upstream ended without a stop event; nothing more to emit
                Ok(None) => break,
                Err(e) => {
                    error!(
                        "Bedrock stream error: model={}, streaming=true: {}",
                        provider_model, e
                    );
                    if let Some(frame) = translator.on_error(&e.to_string()) {
                        let _ = tx.send(Ok(Event::default().data(frame.sse_data()))).await;
                    }
                    break;
                }
            }
        }

        if let Some((input_tokens, output_tokens)) = translator.usage() {
            state.tracker.record(
                &provider_model,
                u64::from(input_tokens),
                u64::from(output_tokens),
            );
        }
    });

    let stream = ReceiverStream::new(rx);
    let sse = Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    );

    debug!("Starting streaming response transmission");
    Ok(sse.into_response())
}

/// Usage report query parameters
#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    /// Look-back window in days
    #[serde(default = "default_window_days")]
    pub days: i64,
}

fn default_window_days() -> i64 {
    30
}

/// Combined usage and cost report
#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub usage: UsageSummary,
    pub cost: CostSummary,
}

/// Report recorded usage and cost over a window
///
/// GET /v1/usage?days=N
pub async fn usage_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsageQuery>,
) -> AppResult<Json<UsageReport>> {
    if query.days < 0 {
        return Err(AppError::InvalidRequest(
            "days must be non-negative".to_string(),
        ));
    }

    Ok(Json(UsageReport {
        usage: state.tracker.total_usage(query.days),
        cost: state.tracker.total_cost(query.days),
    }))
}

/// Validate a chat completion request before any upstream call
fn validate_chat_request(request: &ChatCompletionRequest) -> Result<(), String> {
    if request.model.is_empty() {
        return Err("Model name cannot be empty".to_string());
    }

    if request.messages.is_empty() {
        return Err("Message list cannot be empty".to_string());
    }

    for (i, message) in request.messages.iter().enumerate() {
        if !matches!(message.role.as_str(), "system" | "user" | "assistant") {
            return Err(format!("Message {} role is invalid: {}", i, message.role));
        }
    }

    if !(0.0..=2.0).contains(&request.temperature) {
        return Err("temperature must be between 0.0 and 2.0".to_string());
    }

    if let Some(top_p) = request.top_p {
        if !(0.0..=1.0).contains(&top_p) {
            return Err("top_p must be between 0.0 and 1.0".to_string());
        }
    }

    if let Some(max_tokens) = request.max_tokens {
        if max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
    }

    Ok(())
}
