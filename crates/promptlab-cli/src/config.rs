//! Harness configuration

use anyhow::Context;
use promptlab_classifiers::ExperimentConfig;
use promptlab_core::{ClientConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Values given on the command line that beat the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptLabConfig {
    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Categories, texts, strategies and sampling
    #[serde(default)]
    pub experiment: ExperimentConfig,
}

impl PromptLabConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, overrides: &Overrides) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("failed to read config file {config_path}"))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid config file {config_path}"))?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model) = &overrides.model {
            config.provider.model = model.clone();
        }

        if let Some(base_url) = &overrides.base_url {
            config.provider.base_url = base_url.clone();
        }

        Ok(config)
    }

    /// Client settings; fails when the API key is not in the environment
    pub fn client_config(&self) -> promptlab_core::Result<ClientConfig> {
        self.client_config_with(|name| std::env::var(name).ok())
    }

    /// Client settings with an explicit environment lookup
    pub fn client_config_with<F>(&self, lookup: F) -> promptlab_core::Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = &self.provider;
        Ok(ClientConfig::from_lookup(&provider.api_key_env, lookup)?
            .with_model(&provider.model)
            .with_base_url(&provider.base_url)
            .with_timeout(Duration::from_secs(provider.timeout_secs)))
    }
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}
