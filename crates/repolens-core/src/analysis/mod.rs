//! Repository analysis engine
//!
//! Selects specialist agents from the configured catalog, asks each for
//! findings, and merges the reports into one structured synthesis plus a
//! ready-to-file GitHub issue payload.

mod agents;
mod engine;
mod prompts;
mod synthesis;

pub use agents::{relevance, select_agents, AgentSelection};
pub use engine::{LlmRepoAnalyzer, RepoSource, METHOD_DIRECT, METHOD_MULTI_AGENT};
pub use prompts::{build_agent_messages, build_synthesis_messages, describe_repository};
pub use synthesis::{build_github_payload, parse_synthesis};
