//! LLM-backed repository analyzer

use super::agents::select_agents;
use super::prompts::{build_agent_messages, build_synthesis_messages};
use super::synthesis::{build_github_payload, parse_synthesis};
use crate::collaborator::RepoAnalyzer;
use crate::config::AnalysisConfig;
use crate::github::{GithubClient, RepoContext, RepoRef};
use crate::llm::SharedProvider;
use crate::types::{AnalysisOutcome, JsonMap};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Method label when specialist agents contributed
pub const METHOD_MULTI_AGENT: &str = "multi_agent_synthesis";
/// Method label when no agent was available
pub const METHOD_DIRECT: &str = "direct_llm";

/// Source of repository context
pub trait RepoSource: Send + Sync {
    fn fetch_context(&self, repo: &RepoRef, readme_char_limit: usize) -> Result<RepoContext>;
}

impl RepoSource for GithubClient {
    fn fetch_context(&self, repo: &RepoRef, readme_char_limit: usize) -> Result<RepoContext> {
        GithubClient::fetch_context(self, repo, readme_char_limit)
    }
}

/// Analyzer that consults specialist agents and synthesizes their reports
pub struct LlmRepoAnalyzer {
    source: Arc<dyn RepoSource>,
    llm: SharedProvider,
    config: AnalysisConfig,
}

impl LlmRepoAnalyzer {
    pub fn new(source: Arc<dyn RepoSource>, llm: SharedProvider, config: AnalysisConfig) -> Self {
        Self { source, llm, config }
    }
}

impl RepoAnalyzer for LlmRepoAnalyzer {
    fn analyze(&self, repo_url: &str) -> Result<AnalysisOutcome> {
        let repo = match RepoRef::parse(repo_url) {
            Ok(repo) => repo,
            Err(e) => return Ok(AnalysisOutcome::failed(e.to_string())),
        };

        let ctx = match self.source.fetch_context(&repo, self.config.readme_char_limit) {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!(repo = %repo, error = %e, "Repository fetch failed");
                return Ok(AnalysisOutcome::failed(format!(
                    "Failed to fetch repository {}: {}",
                    repo, e
                )));
            }
        };

        let selection = select_agents(&self.config.agents, &ctx, self.config.max_agents);
        tracing::info!(
            repo = %repo,
            discovered = selection.discovered,
            selected = ?selection.ids(),
            model = self.llm.model(),
            "Running analysis agents"
        );

        let mut findings = Vec::with_capacity(selection.selected.len());
        for agent in &selection.selected {
            let report = self.llm.complete(&build_agent_messages(agent, &ctx))?;
            findings.push((agent.id.clone(), report));
        }

        let reply = self.llm.complete(&build_synthesis_messages(&ctx, &findings))?;
        let mut synthesis = parse_synthesis(&reply);

        let selected_ids = selection.ids();
        let github_payload = build_github_payload(&ctx.full_name, &synthesis, &selected_ids);

        if !findings.is_empty() {
            let reports: JsonMap = findings
                .into_iter()
                .map(|(id, report)| (id, Value::String(report)))
                .collect();
            synthesis.insert("agent_reports".to_string(), Value::Object(reports));
        }

        let method = if selected_ids.is_empty() {
            METHOD_DIRECT
        } else {
            METHOD_MULTI_AGENT
        };

        Ok(AnalysisOutcome {
            success: true,
            repository: Some(ctx.full_name),
            analysis_method: Some(method.to_string()),
            agents_discovered: Some(selection.discovered as u64),
            agents_used: Some(selected_ids.len() as u64),
            selected_agents: Some(selected_ids),
            synthesized_analysis: Some(synthesis),
            github_payload: Some(github_payload),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_agents;
    use crate::llm::{ChatMessage, LlmError, LlmProvider, ProviderStatus};
    use crate::CoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource(Option<RepoContext>);

    impl RepoSource for StaticSource {
        fn fetch_context(&self, repo: &RepoRef, _limit: usize) -> Result<RepoContext> {
            self.0.clone().ok_or(CoreError::Github {
                status: 404,
                message: format!("{} Not Found", repo),
            })
        }
    }

    /// Answers agent prompts with a bullet and the synthesis prompt with JSON
    struct ScriptedLlm {
        calls: AtomicUsize,
        fail: bool,
    }

    impl LlmProvider for ScriptedLlm {
        fn id(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test"
        }

        fn status(&self) -> ProviderStatus {
            ProviderStatus::Ready
        }

        fn complete(&self, messages: &[ChatMessage]) -> std::result::Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LlmError::Connection("refused".to_string()));
            }
            if messages[0].content.contains("lead reviewer") {
                Ok(r#"{"title": "Add plugins", "summary": "Good", "priority": "high"}"#.to_string())
            } else {
                Ok("- finding".to_string())
            }
        }
    }

    fn analyzer(ctx: Option<RepoContext>, fail: bool, config: AnalysisConfig) -> (LlmRepoAnalyzer, Arc<ScriptedLlm>) {
        let llm = Arc::new(ScriptedLlm {
            calls: AtomicUsize::new(0),
            fail,
        });
        (
            LlmRepoAnalyzer::new(Arc::new(StaticSource(ctx)), llm.clone(), config),
            llm,
        )
    }

    fn widgets() -> RepoContext {
        RepoContext {
            full_name: "acme/widgets".to_string(),
            description: Some("A web api with auth".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_multi_agent_analysis() {
        let (analyzer, llm) = analyzer(Some(widgets()), false, AnalysisConfig::default());
        let outcome = analyzer.analyze("https://github.com/acme/widgets").unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(outcome.analysis_method.as_deref(), Some(METHOD_MULTI_AGENT));
        assert_eq!(outcome.agents_discovered, Some(4));
        assert_eq!(outcome.agents_used, Some(3));
        assert_eq!(outcome.selected_agents.as_ref().map(Vec::len), Some(3));
        // three agents plus synthesis
        assert_eq!(llm.calls.load(Ordering::SeqCst), 4);

        let synthesis = outcome.synthesized_analysis.unwrap();
        assert_eq!(synthesis["summary"], Value::from("Good"));
        assert_eq!(synthesis["agent_reports"].as_object().unwrap().len(), 3);

        let payload = outcome.github_payload.unwrap();
        assert_eq!(payload["title"], Value::from("Add plugins"));
    }

    #[test]
    fn test_direct_analysis_without_agents() {
        let config = AnalysisConfig {
            agents: Vec::new(),
            ..AnalysisConfig::default()
        };
        let (analyzer, llm) = analyzer(Some(widgets()), false, config);
        let outcome = analyzer.analyze("https://github.com/acme/widgets").unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.analysis_method.as_deref(), Some(METHOD_DIRECT));
        assert_eq!(outcome.agents_discovered, Some(0));
        assert_eq!(outcome.agents_used, Some(0));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert!(!outcome.synthesized_analysis.unwrap().contains_key("agent_reports"));
    }

    #[test]
    fn test_fetch_failure_is_reported_not_raised() {
        let (analyzer, llm) = analyzer(None, false, AnalysisConfig::default());
        let outcome = analyzer.analyze("https://github.com/acme/missing").unwrap();

        assert!(!outcome.success);
        assert!(outcome
            .failure_message()
            .starts_with("Failed to fetch repository acme/missing"));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unparseable_url_is_reported() {
        let (analyzer, _) = analyzer(Some(widgets()), false, AnalysisConfig::default());
        let outcome = analyzer.analyze("https://github.com/acme").unwrap();
        assert!(!outcome.success);
    }

    #[test]
    fn test_llm_fault_propagates() {
        let (analyzer, _) = analyzer(Some(widgets()), true, AnalysisConfig::default());
        let err = analyzer.analyze("https://github.com/acme/widgets").unwrap_err();
        assert_eq!(err.to_string(), "LLM error: Connection error: refused");
    }

    #[test]
    fn test_default_catalog_is_used() {
        assert_eq!(AnalysisConfig::default().agents, default_agents());
    }
}
