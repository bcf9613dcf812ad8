//! PromptLab Core
//!
//! Core types, traits, and utilities shared across PromptLab components.
//!
//! This crate provides:
//! - Error types and result handling
//! - Chat message and generation parameter types
//! - The [`CompletionClient`] trait and an OpenAI-compatible HTTP implementation
//! - Client configuration read once at startup

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{ChatCompletionsClient, CompletionClient};
pub use config::{ClientConfig, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{Error, Result};
pub use types::{ChatMessage, GenerationParams};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{ChatCompletionsClient, CompletionClient};
    pub use crate::config::ClientConfig;
    pub use crate::error::{Error, Result};
    pub use crate::types::GenerationParams;
}
