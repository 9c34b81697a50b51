//! Configuration types for RepoLens
//!
//! Defines the structure of `.repolens.toml` configuration.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub API access
    #[serde(default)]
    pub github: GithubConfig,

    /// LLM backend used by the analysis engine
    #[serde(default)]
    pub llm: LlmConfig,

    /// Analysis agent catalog and selection limits
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// HTTP server section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Service name reported by the health endpoint
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_service_name() -> String {
    "Repository Analysis API".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_name: default_service_name(),
        }
    }
}

/// GitHub section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub token: Option<String>,

    /// REST API base URL
    #[serde(default = "default_github_api")]
    pub api_base: String,

    /// User-Agent header, required by the GitHub API
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_github_timeout")]
    pub timeout_secs: u64,
}

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("repolens/{}", env!("CARGO_PKG_VERSION"))
}

fn default_github_timeout() -> u64 {
    30
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: default_github_api(),
            user_agent: default_user_agent(),
            timeout_secs: default_github_timeout(),
        }
    }
}

/// LLM section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider to use (openai, ollama)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the API, provider default when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model name, provider default when unset
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Analysis section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Upper bound on agents consulted per analysis
    #[serde(default = "default_max_agents")]
    pub max_agents: usize,

    /// Maximum README characters passed to the model
    #[serde(default = "default_readme_limit")]
    pub readme_char_limit: usize,

    /// Agent catalog
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentConfig>,
}

fn default_max_agents() -> usize {
    3
}

fn default_readme_limit() -> usize {
    6000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_agents: default_max_agents(),
            readme_char_limit: default_readme_limit(),
            agents: default_agents(),
        }
    }
}

/// A single analysis agent in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Stable identifier reported in `selected_agents`
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// What the agent looks for, injected into its prompt
    pub focus: String,

    /// Terms that make this agent relevant to a repository
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Whether this agent may be selected
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl AgentConfig {
    fn new(id: &str, name: &str, focus: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            focus: focus.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            enabled: true,
        }
    }
}

/// Create the default agent catalog
pub fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig::new(
            "feature-scout",
            "Feature Scout",
            "Identify missing features and product improvements users would value",
            &["app", "api", "cli", "library", "framework", "tool", "web"],
        ),
        AgentConfig::new(
            "security-auditor",
            "Security Auditor",
            "Spot security weaknesses, unsafe defaults and dependency risks",
            &["auth", "crypto", "server", "http", "token", "password", "security"],
        ),
        AgentConfig::new(
            "docs-reviewer",
            "Documentation Reviewer",
            "Assess documentation, onboarding and examples",
            &["docs", "documentation", "guide", "tutorial", "readme", "example"],
        ),
        AgentConfig::new(
            "performance-analyst",
            "Performance Analyst",
            "Find performance bottlenecks and scalability concerns",
            &["performance", "fast", "cache", "async", "concurrency", "database", "rust", "go", "c++"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.service_name, "Repository Analysis API");
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.analysis.max_agents, 3);
        assert_eq!(config.analysis.agents.len(), 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [server]
            port = 8088

            [[analysis.agents]]
            id = "custom"
            focus = "Look at tests"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.analysis.agents.len(), 1);
        assert!(config.analysis.agents[0].enabled);
        assert!(config.analysis.agents[0].keywords.is_empty());
    }
}
