//! Core types for PromptLab

use serde::{Deserialize, Serialize};

/// A chat message in the request sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// Sampling settings for a single completion call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
}

impl GenerationParams {
    /// Settings used for gated classification: bounded and deterministic
    pub const CLASSIFICATION: Self = Self {
        max_tokens: 500,
        temperature: 0.0,
    };

    /// Settings shared by every call of a strategy comparison
    pub const COMPARISON: Self = Self {
        max_tokens: 500,
        temperature: 0.5,
    };

    /// Create new generation settings
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// Request body for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatCompletionRequest {
    /// Build a single-turn request carrying one user prompt
    pub fn single_turn(
        model: impl Into<String>,
        prompt: impl Into<String>,
        params: GenerationParams,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

/// Successful chat completions response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// One generated alternative; only the first is used
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

/// Assistant message inside a choice; `content` may be null
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope returned by OpenAI-compatible providers
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderErrorBody {
    pub error: ProviderErrorDetail,
}

/// `error` object of the envelope
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderErrorDetail {
    pub message: String,
}
