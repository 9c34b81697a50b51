//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.repolens.toml` in the working directory or the
//! user config directory.

use super::types::GatewayConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. Explicit path (must exist)
/// 2. Project-level `.repolens.toml`
/// 3. User-level `~/.config/repolens/config.toml`
/// 4. Default configuration
///
/// Environment overrides are applied on top in every case.
pub fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<GatewayConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_from_file(path);
    }

    let project_config = project_dir.join(".repolens.toml");
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    apply_env_overrides(GatewayConfig::default())
}

/// Get user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("repolens").join("config.toml"))
}

/// Load configuration from a specific file
fn load_from_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: GatewayConfig = toml::from_str(&content)?;

    expand_env_vars(&mut config);

    apply_env_overrides(config)
}

fn env_regex() -> &'static Regex {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    ENV_REGEX.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// Expand ${VAR} patterns in secret and URL values
fn expand_env_vars(config: &mut GatewayConfig) {
    let regex = env_regex();

    if let Some(ref token) = config.github.token {
        config.github.token = Some(expand_string(token, regex));
    }
    if let Some(ref api_key) = config.llm.api_key {
        config.llm.api_key = Some(expand_string(api_key, regex));
    }
    if let Some(ref base_url) = config.llm.base_url {
        config.llm.base_url = Some(expand_string(base_url, regex));
    }
    config.github.api_base = expand_string(&config.github.api_base, regex);
}

/// Expand environment variables in a single string
fn expand_string(s: &str, regex: &Regex) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

/// Apply environment variable overrides for common settings
///
/// Supports:
/// - GITHUB_TOKEN -> github.token
/// - OPENAI_API_KEY -> llm.api_key (when provider is openai)
/// - OPENAI_BASE_URL / OLLAMA_BASE_URL -> llm.base_url for the matching provider
/// - REPOLENS_LLM_PROVIDER -> llm.provider
/// - REPOLENS_HOST -> server.host
/// - REPOLENS_PORT / PORT -> server.port
fn apply_env_overrides(mut config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    if let Some(token) = non_empty_env("GITHUB_TOKEN") {
        config.github.token = Some(token);
    }

    if let Some(provider) = non_empty_env("REPOLENS_LLM_PROVIDER") {
        config.llm.provider = provider.to_lowercase();
    }

    match config.llm.provider.as_str() {
        "openai" => {
            if let Some(key) = non_empty_env("OPENAI_API_KEY") {
                config.llm.api_key = Some(key);
            }
            if let Some(url) = non_empty_env("OPENAI_BASE_URL") {
                config.llm.base_url = Some(url);
            }
        }
        "ollama" => {
            if let Some(url) = non_empty_env("OLLAMA_BASE_URL") {
                config.llm.base_url = Some(url);
            }
        }
        _ => {}
    }

    if let Some(host) = non_empty_env("REPOLENS_HOST") {
        config.server.host = host;
    }

    for var in ["REPOLENS_PORT", "PORT"] {
        if let Some(value) = non_empty_env(var) {
            config.server.port = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: var.to_string(),
                value,
            })?;
            break;
        }
    }

    Ok(config)
}

/// Generate a sample configuration file
pub fn sample_config() -> &'static str {
    r#"# RepoLens Configuration
# Place this file at ./.repolens.toml or ~/.config/repolens/config.toml

[server]
host = "0.0.0.0"
port = 5000

[github]
# Needed for issue creation and higher rate limits
token = "${GITHUB_TOKEN}"

[llm]
# openai | ollama
provider = "ollama"
base_url = "http://localhost:11434"
model = "llama3.1"

# [llm]
# provider = "openai"
# api_key = "${OPENAI_API_KEY}"
# model = "gpt-4o-mini"

[analysis]
max_agents = 3

[[analysis.agents]]
id = "feature-scout"
name = "Feature Scout"
focus = "Identify missing features and product improvements users would value"
keywords = ["app", "api", "cli", "library"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_string() {
        std::env::set_var("REPOLENS_TEST_EXPAND", "secret");
        let regex = env_regex();
        assert_eq!(expand_string("${REPOLENS_TEST_EXPAND}", regex), "secret");
        assert_eq!(
            expand_string("Bearer ${REPOLENS_TEST_EXPAND}!", regex),
            "Bearer secret!"
        );
    }

    #[test]
    fn test_expand_missing_var_is_left_verbatim() {
        let regex = env_regex();
        assert_eq!(
            expand_string("${REPOLENS_DEFINITELY_UNSET_VAR}", regex),
            "${REPOLENS_DEFINITELY_UNSET_VAR}"
        );
    }

    #[test]
    fn test_sample_config_parses() {
        let config: GatewayConfig = toml::from_str(sample_config()).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.analysis.agents.len(), 1);
    }

    #[test]
    fn test_load_project_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".repolens.toml"),
            "[server]\nservice_name = \"Test Gateway\"\n",
        )
        .unwrap();

        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.server.service_name, "Test Gateway");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
