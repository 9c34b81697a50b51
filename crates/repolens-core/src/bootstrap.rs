//! Collaborator construction from configuration

use crate::analysis::LlmRepoAnalyzer;
use crate::collaborator::Collaborators;
use crate::config::{GatewayConfig, LlmConfig};
use crate::github::GithubClient;
use crate::llm::{LlmProvider, OllamaProvider, OpenAIProvider, ProviderStatus, SharedProvider};
use crate::{CoreError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Build the LLM provider named in `config.provider`
pub fn build_provider(config: &LlmConfig) -> Result<SharedProvider> {
    let timeout = Duration::from_secs(config.timeout_secs);

    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .api_key
                .as_deref()
                .filter(|k| !k.is_empty() && !k.starts_with("${"))
                .ok_or_else(|| CoreError::config("OpenAI provider requires an API key"))?;

            let mut provider = OpenAIProvider::new(api_key, config.model.as_deref(), timeout);
            if let Some(url) = config.base_url.as_deref() {
                provider = provider.with_base_url(url);
            }
            Ok(Arc::new(provider))
        }
        "ollama" => Ok(Arc::new(OllamaProvider::new(
            config.base_url.as_deref(),
            config.model.as_deref(),
            timeout,
        ))),
        other => Err(CoreError::config(format!("Unsupported LLM provider: {}", other))),
    }
}

/// Reject a provider that reports itself unusable
fn ensure_available(provider: &dyn LlmProvider) -> Result<()> {
    match provider.status() {
        ProviderStatus::Ready => Ok(()),
        ProviderStatus::Unavailable(reason) => Err(CoreError::config(format!(
            "LLM provider '{}' unavailable: {}",
            provider.id(),
            reason
        ))),
    }
}

/// Build the analyzer and issue tracker for the gateway
pub fn build_collaborators(config: &GatewayConfig) -> Result<Collaborators> {
    let github = Arc::new(GithubClient::new(&config.github));
    if !github.has_token() {
        tracing::warn!("No GitHub token configured; issue creation will fail and API rate limits are low");
    }

    let llm = build_provider(&config.llm)?;
    ensure_available(llm.as_ref())?;
    tracing::info!(provider = llm.id(), model = llm.model(), "LLM provider configured");

    let analyzer = LlmRepoAnalyzer::new(github.clone(), llm, config.analysis.clone());

    Ok(Collaborators::new(Arc::new(analyzer), github))
}
