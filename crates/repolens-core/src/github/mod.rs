//! GitHub REST integration
//!
//! Repository URL parsing, repository context for analysis, and issue creation.

mod client;
mod repo_ref;

pub use client::{GithubClient, RepoContext};
pub use repo_ref::RepoRef;

/// Prefix every accepted repository URL must start with
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";
