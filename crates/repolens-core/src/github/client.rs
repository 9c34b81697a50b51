//! Blocking GitHub REST client

use super::RepoRef;
use crate::collaborator::{IssueDraft, IssueTracker};
use crate::config::GithubConfig;
use crate::types::IssueOutcome;
use crate::{CoreError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

const API_VERSION: &str = "2022-11-28";

/// Repository facts fed to the analysis agents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoContext {
    pub full_name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub primary_language: Option<String>,
    /// Language name to bytes of code, as reported by GitHub
    pub languages: BTreeMap<String, u64>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub open_issues: u64,
    pub default_branch: Option<String>,
    pub readme: Option<String>,
}

impl RepoContext {
    /// Languages ordered by code size, largest first
    pub fn ranked_languages(&self) -> Vec<&str> {
        let mut langs: Vec<(&String, &u64)> = self.languages.iter().collect();
        langs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        langs.into_iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    title: String,
    html_url: String,
    state: String,
}

impl From<IssueResponse> for IssueOutcome {
    fn from(issue: IssueResponse) -> Self {
        IssueOutcome {
            number: issue.number,
            title: issue.title,
            url: issue.html_url,
            state: issue.state,
        }
    }
}

/// GitHub API client
pub struct GithubClient {
    api_base: String,
    token: Option<String>,
    user_agent: String,
    client: ureq::Agent,
}

impl GithubClient {
    /// Create a client from configuration
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            user_agent: config.user_agent.clone(),
            client: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build(),
        }
    }

    /// Whether a token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}{}", self.api_base, path);
        let request = self
            .client
            .request(method, &url)
            .set("User-Agent", &self.user_agent)
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION);

        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Fetch metadata, languages and README for `repo`
    pub fn fetch_context(&self, repo: &RepoRef, readme_char_limit: usize) -> Result<RepoContext> {
        let path = format!("/repos/{}/{}", repo.owner, repo.name);

        let meta: RepoResponse = self
            .request("GET", &path)
            .call()?
            .into_json()?;

        let languages: BTreeMap<String, u64> = match self
            .request("GET", &format!("{}/languages", path))
            .call()
        {
            Ok(response) => response.into_json()?,
            Err(e) => {
                tracing::warn!(repo = %repo, error = %e, "Could not fetch languages");
                BTreeMap::new()
            }
        };

        let readme = self.fetch_readme(&path)?.map(|text| truncate_chars(&text, readme_char_limit));

        Ok(RepoContext {
            full_name: meta.full_name,
            description: meta.description,
            homepage: meta.homepage.filter(|h| !h.is_empty()),
            primary_language: meta.language,
            languages,
            topics: meta.topics,
            stars: meta.stargazers_count,
            open_issues: meta.open_issues_count,
            default_branch: meta.default_branch,
            readme,
        })
    }

    fn fetch_readme(&self, repo_path: &str) -> Result<Option<String>> {
        let response = self
            .request("GET", &format!("{}/readme", repo_path))
            .set("Accept", "application/vnd.github.raw")
            .call();

        match response {
            Ok(response) => Ok(Some(response.into_string()?)),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl IssueTracker for GithubClient {
    fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_data: &serde_json::Value,
    ) -> Result<IssueOutcome> {
        if !self.has_token() {
            return Err(CoreError::config("GitHub token not configured"));
        }

        let draft = IssueDraft::from_issue_data(issue_data)?;
        let path = format!("/repos/{}/{}/issues", owner, repo);

        let issue: IssueResponse = self
            .request("POST", &path)
            .send_json(serde_json::to_value(&draft)?)?
            .into_json()?;

        tracing::info!(owner, repo, number = issue.number, "Created GitHub issue");
        Ok(issue.into())
    }
}

/// Cut `text` to at most `limit` characters on a char boundary
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}\n…[truncated]", &text[..idx]),
        None => text.to_string(),
    }
}
