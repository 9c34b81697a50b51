//! LLM integration module
//!
//! Blocking chat completion against the configured backend.
//!
//! Supported providers:
//! - OpenAI (and OpenAI-compatible endpoints)
//! - Ollama (local inference)

mod error;
mod message;
mod ollama;
mod openai;
mod provider;

pub use error::LlmError;
pub use message::{ChatMessage, Role};
pub use provider::{LlmProvider, ProviderStatus, SharedProvider};

// Provider implementations
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
