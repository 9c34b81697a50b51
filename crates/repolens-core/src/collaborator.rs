//! Collaborator contracts
//!
//! The gateway only sees these two traits. Both calls are blocking; callers on
//! an async runtime must move them onto a blocking thread.

use crate::types::{AnalysisOutcome, IssueOutcome, JsonMap};
use crate::Result;
use std::sync::Arc;

/// Repository analysis engine
pub trait RepoAnalyzer: Send + Sync {
    /// Analyze the repository at `repo_url`.
    ///
    /// `Ok` with `success == false` is a reported failure; `Err` is a fault.
    fn analyze(&self, repo_url: &str) -> Result<AnalysisOutcome>;
}

/// Issue tracker backend
pub trait IssueTracker: Send + Sync {
    /// Create an issue in `owner/repo` from `issue_data`
    fn create_issue(&self, owner: &str, repo: &str, issue_data: &serde_json::Value)
        -> Result<IssueOutcome>;
}

/// Thread-safe analyzer reference
pub type SharedAnalyzer = Arc<dyn RepoAnalyzer>;

/// Thread-safe issue tracker reference
pub type SharedIssueTracker = Arc<dyn IssueTracker>;

/// Both collaborators, constructed together at startup
#[derive(Clone)]
pub struct Collaborators {
    pub analyzer: SharedAnalyzer,
    pub issues: SharedIssueTracker,
}

impl Collaborators {
    pub fn new(analyzer: SharedAnalyzer, issues: SharedIssueTracker) -> Self {
        Self { analyzer, issues }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Issue fields pulled out of an `issueData` object
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IssueDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

impl IssueDraft {
    /// Build a draft from `issueData`; only `title` is mandatory
    pub fn from_issue_data(issue_data: &serde_json::Value) -> Result<Self> {
        let map: &JsonMap = issue_data
            .as_object()
            .ok_or_else(|| crate::CoreError::invalid_input("issueData must be an object"))?;

        let title = map
            .get("title")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| crate::CoreError::invalid_input("issueData.title is required"))?
            .to_string();

        let body = map.get("body").and_then(|v| v.as_str()).map(str::to_string);

        Ok(Self {
            title,
            body,
            labels: string_list(map.get("labels")),
            assignees: string_list(map.get("assignees")),
        })
    }
}

fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
