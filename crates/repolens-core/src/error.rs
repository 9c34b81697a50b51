//! Error types for RepoLens Core
//!
//! Provides a unified error type for all backend operations.

use crate::llm::LlmError;
use thiserror::Error;

/// Result type for RepoLens Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Unified error type for RepoLens Core
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// GitHub API error
    #[error("GitHub API error ({status}): {message}")]
    Github { status: u16, message: String },

    /// Network failure talking to GitHub
    #[error("GitHub connection error: {0}")]
    GithubConnection(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Analysis pipeline error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Caller supplied data the collaborator cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        CoreError::Config(msg.into())
    }

    /// Create an analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        CoreError::Analysis(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CoreError::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl From<ureq::Error> for CoreError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let raw = response.into_string().unwrap_or_default();
                // GitHub puts a human-readable reason under "message"
                let message = serde_json::from_str::<serde_json::Value>(&raw)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                    .unwrap_or_else(|| {
                        if raw.is_empty() {
                            "Unknown error".to_string()
                        } else {
                            raw
                        }
                    });
                CoreError::Github { status, message }
            }
            ureq::Error::Transport(transport) => CoreError::GithubConnection(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_error_display() {
        let err = CoreError::Github {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error (404): Not Found");
    }

    #[test]
    fn test_llm_error_wraps() {
        let err: CoreError = LlmError::Timeout.into();
        assert_eq!(err.to_string(), "LLM error: Request timed out");
    }
}
