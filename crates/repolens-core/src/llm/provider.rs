//! LLM provider trait

use super::{ChatMessage, LlmError};
use std::sync::Arc;

/// Provider status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Ready to accept requests
    Ready,

    /// Not available (no API key, etc.)
    Unavailable(String),
}

/// LLM provider trait
///
/// Implementations perform a single blocking, non-streaming completion.
pub trait LlmProvider: Send + Sync {
    /// Get the provider's unique identifier (e.g., "openai", "ollama")
    fn id(&self) -> &str;

    /// Get the active model name
    fn model(&self) -> &str;

    /// Get current provider status without touching the network
    fn status(&self) -> ProviderStatus;

    /// Send the conversation and return the assistant's reply text
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Thread-safe provider reference
pub type SharedProvider = Arc<dyn LlmProvider>;
