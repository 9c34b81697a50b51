//! Configuration module for RepoLens
//!
//! Handles loading and parsing of `.repolens.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;

pub use loader::{load_config, sample_config, user_config_path, ConfigError};
pub use types::{
    default_agents, AgentConfig, AnalysisConfig, GatewayConfig, GithubConfig, LlmConfig,
    ServerConfig,
};
