//! Error types for PromptLab

/// Result type alias using PromptLab's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for PromptLab operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing credential, invalid threshold or category set
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a usable response (network, timeout, bad body)
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("provider error ({status}): {message}")]
    Provider {
        /// HTTP status code returned by the provider
        status: u16,
        /// Message extracted from the provider's error envelope
        message: String,
    },

    /// Model output could not be turned into a classification record
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new provider error
    pub fn provider(status: u16, msg: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: msg.into(),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether the failure happened while talking to the completion API
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Provider { .. })
    }

    /// Whether the model answered but its output was unusable
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
