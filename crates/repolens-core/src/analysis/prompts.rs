//! Prompt construction for agent and synthesis passes

use crate::config::AgentConfig;
use crate::github::RepoContext;
use crate::llm::ChatMessage;

const AGENT_SYSTEM_PROMPT: &str = r#"
You are a specialist reviewing a GitHub repository on behalf of its maintainers.
You only see the repository metadata and README provided by the user.

Report concrete, actionable findings in your area of focus as a short bullet list.
Do not invent files or code you cannot see. If the context is insufficient, say so in one bullet.
"#;

const SYNTHESIS_SYSTEM_PROMPT: &str = r#"
You are the lead reviewer combining specialist reports about a GitHub repository.

**Output Format:**
You must respond with a strict JSON object (no markdown formatting) in the following format:
{
  "title": "Short issue title summarizing the top suggestion",
  "summary": "Two or three sentences on the state of the project",
  "suggested_features": [
    {"name": "Feature name", "description": "What and why", "effort": "low" | "medium" | "high"}
  ],
  "risks": ["Notable risk or weakness"],
  "priority": "low" | "medium" | "high"
}

Merge duplicate suggestions. Keep at most five features.
"#;

/// Render the repository context as a user message body
pub fn describe_repository(ctx: &RepoContext) -> String {
    let mut out = format!("Repository: {}\n", ctx.full_name);

    if let Some(description) = &ctx.description {
        out.push_str(&format!("Description: {}\n", description));
    }
    if let Some(homepage) = &ctx.homepage {
        out.push_str(&format!("Homepage: {}\n", homepage));
    }

    let languages = ctx.ranked_languages();
    if !languages.is_empty() {
        out.push_str(&format!("Languages: {}\n", languages.join(", ")));
    } else if let Some(lang) = &ctx.primary_language {
        out.push_str(&format!("Language: {}\n", lang));
    }

    if !ctx.topics.is_empty() {
        out.push_str(&format!("Topics: {}\n", ctx.topics.join(", ")));
    }
    out.push_str(&format!("Stars: {}, open issues: {}\n", ctx.stars, ctx.open_issues));

    match &ctx.readme {
        Some(readme) => out.push_str(&format!("\nREADME:\n{}\n", readme)),
        None => out.push_str("\n(no README)\n"),
    }

    out
}

/// Messages for one specialist agent
pub fn build_agent_messages(agent: &AgentConfig, ctx: &RepoContext) -> Vec<ChatMessage> {
    let display = if agent.name.is_empty() {
        agent.id.as_str()
    } else {
        agent.name.as_str()
    };

    vec![
        ChatMessage::system(format!(
            "{}\nYour role: {}\nFocus: {}",
            AGENT_SYSTEM_PROMPT.trim(),
            display,
            agent.focus
        )),
        ChatMessage::user(describe_repository(ctx)),
    ]
}

/// Messages for the synthesis pass over `findings` (agent id, report)
pub fn build_synthesis_messages(ctx: &RepoContext, findings: &[(String, String)]) -> Vec<ChatMessage> {
    let mut body = describe_repository(ctx);

    if findings.is_empty() {
        body.push_str("\nNo specialist reports are available; review the repository directly.\n");
    } else {
        body.push_str("\nSPECIALIST REPORTS:\n");
        for (agent_id, report) in findings {
            body.push_str(&format!("\n### {}\n{}\n", agent_id, report.trim()));
        }
    }

    vec![ChatMessage::system(SYNTHESIS_SYSTEM_PROMPT), ChatMessage::user(body)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    fn ctx() -> RepoContext {
        let mut ctx = RepoContext {
            full_name: "acme/widgets".to_string(),
            description: Some("Widget toolkit".to_string()),
            topics: vec!["ui".to_string()],
            ..Default::default()
        };
        ctx.languages.insert("Rust".to_string(), 100);
        ctx
    }

    #[test]
    fn test_describe_repository() {
        let text = describe_repository(&ctx());
        assert!(text.contains("Repository: acme/widgets"));
        assert!(text.contains("Languages: Rust"));
        assert!(text.contains("Topics: ui"));
        assert!(text.contains("(no README)"));
    }

    #[test]
    fn test_agent_messages_carry_focus() {
        let agent = crate::config::default_agents().remove(1);
        let messages = build_agent_messages(&agent, &ctx());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains(&agent.focus));
    }

    #[test]
    fn test_synthesis_includes_reports() {
        let findings = vec![("security-auditor".to_string(), "- tokens in logs".to_string())];
        let messages = build_synthesis_messages(&ctx(), &findings);
        assert!(messages[1].content.contains("### security-auditor"));
        assert!(messages[1].content.contains("tokens in logs"));
    }
}
