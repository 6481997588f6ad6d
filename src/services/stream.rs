//! Streaming response translation
//!
//! Reframes a Bedrock event stream into OpenAI-style SSE chunk frames. The
//! translator is a value-level state machine: the HTTP layer feeds it events
//! (or an error) and writes out whatever frames come back, so the translation
//! rules stay testable without a live stream.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::bedrock::BedrockStreamEvent;
use crate::models::openai::{ChatCompletionChunk, ChunkChoice, ChunkDelta};

/// Translator lifecycle. Done is terminal; nothing is emitted after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Streaming,
    Done,
}

/// One wire-ready frame of the outbound SSE stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// Content chunk
    Chunk(ChatCompletionChunk),
    /// Terminal sentinel (`data: [DONE]`)
    Done,
    /// In-band error report, emitted at most once
    Error(String),
}

impl StreamFrame {
    /// SSE data payload, without the `data: ` framing
    pub fn sse_data(&self) -> String {
        match self {
            StreamFrame::Chunk(chunk) => {
                serde_json::to_string(chunk).unwrap_or_else(|_| "{}".to_string())
            }
            StreamFrame::Done => "[DONE]".to_string(),
            StreamFrame::Error(message) => {
                serde_json::json!({ "error": message }).to_string()
            }
        }
    }

    /// Complete SSE frame text
    pub fn to_sse(&self) -> String {
        format!("data: {}\n\n", self.sse_data())
    }
}

/// Stateful translator from Bedrock stream events to OpenAI chunk frames.
///
/// One id and creation timestamp are generated per stream and reused on every
/// chunk; a sequence counter tracks how many content frames went out.
#[derive(Debug)]
pub struct StreamTranslator {
    stream_id: String,
    created: i64,
    model: String,
    state: StreamState,
    sequence: u64,
    input_tokens: Option<u32>,
    output_tokens: Option<u32>,
}

impl StreamTranslator {
    /// Start a fresh stream for the given Bedrock model id
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            stream_id: format!("chatcmpl-{}", Uuid::new_v4().simple()),
            created: Utc::now().timestamp(),
            model: model.into(),
            state: StreamState::Streaming,
            sequence: 0,
            input_tokens: None,
            output_tokens: None,
        }
    }

    /// Translate one upstream event into zero or more outbound frames.
    ///
    /// A text delta yields exactly one content chunk; message_stop yields the
    /// sentinel and moves the translator to Done, after which every event is
    /// ignored. Frames come out in event order.
    pub fn on_event(&mut self, event: &BedrockStreamEvent) -> Vec<StreamFrame> {
        if self.state == StreamState::Done {
            return Vec::new();
        }

        self.capture_usage(event);

        let mut frames = Vec::new();

        if let Some(text) = event.delta_text() {
            self.sequence += 1;
            frames.push(StreamFrame::Chunk(ChatCompletionChunk {
                id: self.stream_id.clone(),
                object: "chat.completion.chunk".to_string(),
                created: self.created,
                model: self.model.clone(),
                choices: vec![ChunkChoice {
                    index: 0,
                    delta: ChunkDelta {
                        content: Some(text.to_string()),
                    },
                    finish_reason: None,
                }],
            }));
        }

        if event.is_message_stop() {
            debug!(
                "Stream {} complete after {} chunks",
                self.stream_id, self.sequence
            );
            self.state = StreamState::Done;
            frames.push(StreamFrame::Done);
        }

        frames
    }

    /// Report an upstream failure.
    ///
    /// Emits a single error frame and terminates the stream; returns None if
    /// the stream already ended.
    pub fn on_error(&mut self, message: &str) -> Option<StreamFrame> {
        if self.state == StreamState::Done {
            return None;
        }

        self.state = StreamState::Done;
        Some(StreamFrame::Error(message.to_string()))
    }

    /// Whether the terminal state has been reached
    pub fn is_done(&self) -> bool {
        self.state == StreamState::Done
    }

    /// Number of content chunks emitted so far
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Token usage observed on the stream, if the upstream reported any
    pub fn usage(&self) -> Option<(u32, u32)> {
        if self.input_tokens.is_none() && self.output_tokens.is_none() {
            return None;
        }
        Some((
            self.input_tokens.unwrap_or(0),
            self.output_tokens.unwrap_or(0),
        ))
    }

    fn capture_usage(&mut self, event: &BedrockStreamEvent) {
        // Input tokens arrive on message_start, output tokens on message_delta
        if let Some(usage) = event.message.as_ref().and_then(|m| m.usage.as_ref()) {
            self.input_tokens = Some(usage.input_tokens);
        }
        if let Some(usage) = &event.usage {
            self.output_tokens = Some(usage.output_tokens);
        }
    }
}
