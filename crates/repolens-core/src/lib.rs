//! RepoLens Core - Backend library for RepoLens
//!
//! This crate provides everything behind the HTTP surface:
//! - Collaborator contracts (`RepoAnalyzer`, `IssueTracker`)
//! - The analyzer lifecycle handle with its one-shot initialization
//! - GitHub REST client (repository context, issue creation)
//! - LLM providers (OpenAI-compatible, Ollama)
//! - The multi-agent analysis engine
//! - Configuration loading
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐  analyze()      ┌──────────────────┐
//! │  repolens-server  │ ──────────────→ │  AnalyzerHandle  │
//! │  (axum handlers)  │  create_issue() │  Collaborators   │
//! │                   │ ←────────────── │                  │
//! └───────────────────┘   outcomes      └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use repolens_core::{build_collaborators, AnalyzerHandle, GatewayConfig};
//!
//! let config = GatewayConfig::default();
//! let handle = AnalyzerHandle::initialize(|| build_collaborators(&config));
//!
//! if let Some(c) = handle.collaborators() {
//!     let outcome = c.analyzer.analyze("https://github.com/acme/widgets")?;
//! }
//! ```

pub mod analysis;
pub mod bootstrap;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod github;
pub mod handle;
pub mod llm;
pub mod types;

pub use bootstrap::{build_collaborators, build_provider};
pub use collaborator::{
    Collaborators, IssueDraft, IssueTracker, RepoAnalyzer, SharedAnalyzer, SharedIssueTracker,
};
pub use config::{load_config, GatewayConfig};
pub use error::{CoreError, Result};
pub use github::{GithubClient, RepoRef, GITHUB_URL_PREFIX};
pub use handle::{panic_message, AnalyzerHandle, AnalyzerState};
pub use types::{AnalysisOutcome, AnalysisReport, IssueOutcome, JsonMap};

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
