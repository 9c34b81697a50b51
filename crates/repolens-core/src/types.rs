//! Shared domain types
//!
//! Outcomes produced by the collaborators and consumed by the gateway.

use serde::{Deserialize, Serialize};

/// Free-form JSON object, as produced by the analysis engine and accepted as
/// `issueData`.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Result of one repository analysis.
///
/// Every field other than `success` is optional; consumers apply their own
/// defaults (see [`AnalysisReport`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub success: bool,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub analysis_method: Option<String>,
    #[serde(default)]
    pub agents_discovered: Option<u64>,
    #[serde(default)]
    pub agents_used: Option<u64>,
    #[serde(default)]
    pub selected_agents: Option<Vec<String>>,
    #[serde(default)]
    pub synthesized_analysis: Option<JsonMap>,
    #[serde(default)]
    pub github_payload: Option<JsonMap>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisOutcome {
    /// Successful outcome for `repository` with every other field unset
    pub fn succeeded(repository: impl Into<String>) -> Self {
        Self {
            success: true,
            repository: Some(repository.into()),
            ..Default::default()
        }
    }

    /// Failed outcome carrying the collaborator's reason
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Project a successful outcome onto its reported shape, defaulting
    /// missing counts to 0 and missing collections to empty.
    pub fn into_report(self) -> AnalysisReport {
        AnalysisReport {
            repository: self.repository,
            analysis_method: self.analysis_method,
            agents_discovered: self.agents_discovered.unwrap_or(0),
            agents_used: self.agents_used.unwrap_or(0),
            selected_agents: self.selected_agents.unwrap_or_default(),
            synthesized_analysis: self.synthesized_analysis.unwrap_or_default(),
            github_payload: self.github_payload.unwrap_or_default(),
        }
    }

    /// Failure message, falling back to a generic one
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("Analysis failed")
            .to_string()
    }
}

/// Successful analysis with all defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub repository: Option<String>,
    pub analysis_method: Option<String>,
    pub agents_discovered: u64,
    pub agents_used: u64,
    pub selected_agents: Vec<String>,
    pub synthesized_analysis: JsonMap,
    pub github_payload: JsonMap,
}

/// Issue created by the issue tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueOutcome {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_report_defaults() {
        let report = AnalysisOutcome::succeeded("acme/widgets").into_report();
        assert_eq!(report.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(report.analysis_method, None);
        assert_eq!(report.agents_discovered, 0);
        assert_eq!(report.agents_used, 0);
        assert!(report.selected_agents.is_empty());
        assert!(report.synthesized_analysis.is_empty());
        assert!(report.github_payload.is_empty());
    }

    #[test]
    fn test_report_keeps_values() {
        let outcome: AnalysisOutcome = serde_json::from_value(json!({
            "success": true,
            "repository": "acme/widgets",
            "agents_discovered": 3,
            "agents_used": 1,
            "selected_agents": ["agentA"],
            "synthesized_analysis": {"summary": "ok"}
        }))
        .unwrap();

        let report = outcome.into_report();
        assert_eq!(report.agents_discovered, 3);
        assert_eq!(report.agents_used, 1);
        assert_eq!(report.selected_agents, vec!["agentA".to_string()]);
        assert_eq!(report.synthesized_analysis["summary"], json!("ok"));
    }

    #[test]
    fn test_failure_message_default() {
        assert_eq!(AnalysisOutcome::default().failure_message(), "Analysis failed");
        assert_eq!(
            AnalysisOutcome::failed("").failure_message(),
            "Analysis failed"
        );
        assert_eq!(
            AnalysisOutcome::failed("rate limited").failure_message(),
            "rate limited"
        );
    }
}
