//! OpenAI LLM provider
//!
//! Connects to OpenAI's API (or any compatible endpoint) for chat completions.

use super::{ChatMessage, LlmError, LlmProvider, ProviderStatus};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI provider
pub struct OpenAIProvider {
    /// API key
    api_key: String,

    /// Base URL for the API (supports OpenAI-compatible APIs)
    base_url: String,

    /// Model used for every request
    model: String,

    client: ureq::Agent,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: &str, model: Option<&str>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            client: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Create with a specific base URL (for OpenAI-compatible APIs like Azure, local proxies)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

impl LlmProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn status(&self) -> ProviderStatus {
        if self.api_key.is_empty() {
            ProviderStatus::Unavailable("No API key configured".to_string())
        } else {
            ProviderStatus::Ready
        }
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages.iter().map(ChatMessage::to_json).collect::<Vec<_>>(),
            "temperature": 0.3
        });

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&body)?;

        let json: serde_json::Value = response.into_json()?;
        extract_content(&json)
    }
}

/// Pull the first choice's message text out of a completion response
fn extract_content(json: &serde_json::Value) -> Result<String, LlmError> {
    if let Some(error) = json.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(LlmError::Api {
            status: 500,
            message: message.to_string(),
        });
    }

    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message.content".to_string()))
}
