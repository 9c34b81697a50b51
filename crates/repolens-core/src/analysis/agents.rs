//! Agent discovery and selection
//!
//! Agents come from the configured catalog. Selection ranks enabled agents by
//! how many of their keywords appear in the repository context.

use crate::config::AgentConfig;
use crate::github::RepoContext;

/// Agents considered and chosen for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSelection<'a> {
    /// Number of enabled agents in the catalog
    pub discovered: usize,
    /// Chosen agents, best match first
    pub selected: Vec<&'a AgentConfig>,
}

impl AgentSelection<'_> {
    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().map(|a| a.id.clone()).collect()
    }
}

/// Lowercased searchable text for a repository
fn haystack(ctx: &RepoContext) -> String {
    let mut parts: Vec<String> = vec![ctx.full_name.clone()];
    parts.extend(ctx.description.clone());
    parts.extend(ctx.primary_language.clone());
    parts.extend(ctx.languages.keys().cloned());
    parts.extend(ctx.topics.iter().cloned());
    parts.extend(ctx.readme.clone());
    parts.join(" ").to_lowercase()
}

/// Keyword hits for one agent
pub fn relevance(agent: &AgentConfig, text: &str) -> usize {
    agent
        .keywords
        .iter()
        .filter(|k| !k.is_empty() && text.contains(&k.to_lowercase()))
        .count()
}

/// Pick up to `max_agents` enabled agents for `ctx`.
///
/// Ties keep catalog order, so with no keyword hits the first enabled agents
/// are used.
pub fn select_agents<'a>(
    catalog: &'a [AgentConfig],
    ctx: &RepoContext,
    max_agents: usize,
) -> AgentSelection<'a> {
    let text = haystack(ctx);

    let mut scored: Vec<(usize, usize, &AgentConfig)> = catalog
        .iter()
        .filter(|a| a.enabled)
        .enumerate()
        .map(|(order, agent)| (relevance(agent, &text), order, agent))
        .collect();

    let discovered = scored.len();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    AgentSelection {
        discovered,
        selected: scored
            .into_iter()
            .take(max_agents)
            .map(|(_, _, agent)| agent)
            .collect(),
    }
}
