//! LLM error types

use std::fmt;

/// Error type for LLM operations
#[derive(Debug, Clone)]
pub enum LlmError {
    /// Network/connection error
    Connection(String),

    /// API error (authentication, bad model, etc.)
    Api { status: u16, message: String },

    /// Request timeout
    Timeout,

    /// Rate limited
    RateLimited,

    /// Response did not have the expected shape
    InvalidResponse(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Connection(msg) => write!(f, "Connection error: {}", msg),
            LlmError::Api { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            LlmError::Timeout => write!(f, "Request timed out"),
            LlmError::RateLimited => write!(f, "Rate limited"),
            LlmError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            LlmError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<ureq::Error> for LlmError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response.into_string().unwrap_or_else(|_| "Unknown error".to_string());
                if status == 429 {
                    LlmError::RateLimited
                } else if status == 401 || status == 403 {
                    LlmError::Api {
                        status,
                        message: "Authentication failed".to_string(),
                    }
                } else {
                    LlmError::Api { status, message }
                }
            }
            ureq::Error::Transport(transport) => {
                if matches!(transport.kind(), ureq::ErrorKind::Io)
                    && transport.to_string().to_lowercase().contains("timed out")
                {
                    LlmError::Timeout
                } else {
                    LlmError::Connection(transport.to_string())
                }
            }
        }
    }
}

impl From<std::io::Error> for LlmError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::TimedOut {
            LlmError::Timeout
        } else {
            LlmError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON error: {}", err))
    }
}
