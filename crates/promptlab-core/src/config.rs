//! Completion client configuration

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the API key unless configured otherwise
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// OpenAI-compatible endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Settings established once at startup and shared by every completion call
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer credential for the provider
    pub api_key: String,

    /// Model identifier sent with each request
    pub model: String,

    /// Base URL; `/chat/completions` is appended
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with default model, endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Read the API key from the process environment
    pub fn from_env(key_var: &str) -> Result<Self> {
        Self::from_lookup(key_var, |name| std::env::var(name).ok())
    }

    /// Read the API key through an arbitrary lookup function
    ///
    /// A missing or blank key is a configuration error so that no request is
    /// ever attempted without credentials.
    pub fn from_lookup<F>(key_var: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(key_var) {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            Some(_) => Err(Error::config(format!("{key_var} is set but empty"))),
            None => Err(Error::config(format!(
                "{key_var} is not set; export it or add it to .env"
            ))),
        }
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

// Keep the key out of logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
