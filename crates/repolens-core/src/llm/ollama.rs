//! Ollama LLM provider
//!
//! Connects to a local Ollama instance for chat completion.

use super::{ChatMessage, LlmError, LlmProvider, ProviderStatus};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.1";

/// Ollama provider for local LLM inference
pub struct OllamaProvider {
    /// Base URL for Ollama API
    base_url: String,

    /// Model used for every request
    model: String,

    client: ureq::Agent,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    pub fn new(base_url: Option<&str>, model: Option<&str>, timeout: Duration) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            client: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl LlmProvider for OllamaProvider {
    fn id(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn status(&self) -> ProviderStatus {
        // Reachability is only known once a request is made
        ProviderStatus::Ready
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages.iter().map(ChatMessage::to_json).collect::<Vec<_>>(),
            "stream": false
        });

        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&body)?;

        let json: serde_json::Value = response.into_json()?;

        if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
            return Err(LlmError::Api {
                status: 500,
                message: error.to_string(),
            });
        }

        json.get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::InvalidResponse("missing message.content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let provider = OllamaProvider::new(None, None, Duration::from_secs(1));
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.id(), "ollama");
    }
}
