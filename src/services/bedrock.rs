//! Bedrock client service
//!
//! Thin wrapper around the AWS SDK clients: invoke-model (plain and
//! streaming) against the runtime plane and model listing against the
//! control plane, with a configurable deadline on every call.

use std::time::Duration;

use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::operation::invoke_model_with_response_stream::InvokeModelWithResponseStreamOutput;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::ResponseStream;
use tracing::debug;

use crate::auth::Session;
use crate::models::bedrock::{BedrockRequest, BedrockResponse, BedrockStreamEvent};
use crate::utils::error::{AppError, AppResult};

/// Bedrock API client
#[derive(Debug, Clone)]
pub struct BedrockClient {
    runtime: aws_sdk_bedrockruntime::Client,
    control: aws_sdk_bedrock::Client,
    timeout: Duration,
}

impl BedrockClient {
    /// Create a client pair from an authenticated session
    pub fn new(session: &Session, timeout_secs: u64) -> Self {
        Self {
            runtime: aws_sdk_bedrockruntime::Client::new(session.config()),
            control: aws_sdk_bedrock::Client::new(session.config()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Invoke a model and return the complete response
    pub async fn invoke(
        &self,
        model_id: &str,
        request: &BedrockRequest,
    ) -> AppResult<BedrockResponse> {
        debug!("Invoking Bedrock model: {}", model_id);

        let body = serde_json::to_vec(request)?;

        let call = self
            .runtime
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send();

        let output = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                AppError::UpstreamFailure(format!(
                    "Bedrock call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::UpstreamFailure(format!("{}", DisplayErrorContext(&e))))?;

        let response = serde_json::from_slice(output.body.as_ref())?;
        Ok(response)
    }

    /// Invoke a model and return its event stream.
    ///
    /// The deadline covers stream establishment; once events are flowing the
    /// stream lives as long as the downstream client keeps reading.
    pub async fn invoke_stream(
        &self,
        model_id: &str,
        request: &BedrockRequest,
    ) -> AppResult<BedrockStream> {
        debug!("Invoking Bedrock model with response stream: {}", model_id);

        let body = serde_json::to_vec(request)?;

        let call = self
            .runtime
            .invoke_model_with_response_stream()
            .model_id(model_id)
            .content_type("application/json")
            .body(Blob::new(body))
            .send();

        let output = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                AppError::UpstreamFailure(format!(
                    "Bedrock stream call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::UpstreamFailure(format!("{}", DisplayErrorContext(&e))))?;

        Ok(BedrockStream::new(output))
    }

    /// List Anthropic model ids hosted in the region
    pub async fn list_anthropic_models(&self) -> AppResult<Vec<String>> {
        debug!("Listing Bedrock foundation models");

        let call = self
            .control
            .list_foundation_models()
            .by_provider("Anthropic")
            .send();

        let output = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                AppError::UpstreamFailure(format!(
                    "Bedrock model listing timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::UpstreamFailure(format!("{}", DisplayErrorContext(&e))))?;

        let models = output
            .model_summaries()
            .iter()
            .map(|summary| summary.model_id().to_string())
            .collect();

        Ok(models)
    }
}

/// Open Bedrock response stream.
///
/// Wraps the SDK event receiver so callers see decoded
/// [`BedrockStreamEvent`] values instead of raw payload parts. Dropping the
/// value releases the upstream connection.
pub struct BedrockStream {
    output: InvokeModelWithResponseStreamOutput,
}

impl BedrockStream {
    fn new(output: InvokeModelWithResponseStreamOutput) -> Self {
        Self { output }
    }

    /// Receive and decode the next event; Ok(None) means the stream ended
    pub async fn next(&mut self) -> AppResult<Option<BedrockStreamEvent>> {
        loop {
            match self.output.body.recv().await {
                Ok(Some(ResponseStream::Chunk(part))) => {
                    let Some(blob) = part.bytes() else {
                        continue;
                    };

                    let event = serde_json::from_slice(blob.as_ref()).map_err(|e| {
                        AppError::StreamInterrupted(format!("undecodable stream chunk: {}", e))
                    })?;

                    return Ok(Some(event));
                }
                // Event kinds this gateway does not translate
                Ok(Some(_)) => continue,
                Ok(None) => return Ok(None),
                Err(e) => {
                    return Err(AppError::StreamInterrupted(format!(
                        "{}",
                        DisplayErrorContext(&e)
                    )))
                }
            }
        }
    }
}
