//! Completion client
//!
//! [`CompletionClient`] is the only seam between PromptLab and the hosted
//! model. Every failure (network, auth, quota, malformed body) is converted
//! into an [`Error`] here, so callers never see a raw transport fault.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, GenerationParams, ProviderErrorBody,
};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

/// Trait for anything that can turn a prompt into a completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a single user prompt and return the model's text
    async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String>;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints (Groq, OpenAI, ...)
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    config: ClientConfig,
    url: String,
    http: reqwest::Client,
}

impl ChatCompletionsClient {
    /// Build a client; the HTTP connection pool is created once here
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: config.completions_url(),
            config,
            http,
        })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let start = Instant::now();
        let request = ChatCompletionRequest::single_turn(&self.config.model, prompt, params);

        debug!(
            model = %self.config.model,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            prompt_chars = prompt.len(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = provider_message(&body);
            warn!(status = status.as_u16(), %message, "Provider rejected completion request");
            return Err(Error::provider(status.as_u16(), message));
        }

        let content = extract_content(&body)?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            completion_chars = content.len(),
            "Completion received"
        );

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Pull `choices[0].message.content` out of a success body
fn extract_content(body: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| Error::transport(format!("malformed provider response: {e}")))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::transport("malformed provider response: no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| Error::transport("malformed provider response: empty message content"))
}

/// Best-effort message from a provider error body
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
