//! Synthesis parsing and issue payload rendering

use crate::types::JsonMap;
use serde_json::Value;

/// Parse the synthesis reply into a JSON object.
///
/// Markdown code fences are stripped first. Anything that is not a JSON object
/// is kept verbatim under `summary`.
pub fn parse_synthesis(content: &str) -> JsonMap {
    let clean_content = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    match serde_json::from_str::<Value>(clean_content) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = JsonMap::new();
            map.insert("summary".to_string(), Value::String(content.trim().to_string()));
            map
        }
    }
}

/// Render one suggested feature, which may be a bare string or an object
fn feature_line(feature: &Value) -> Option<String> {
    match feature {
        Value::String(s) if !s.trim().is_empty() => Some(format!("- {}", s.trim())),
        Value::Object(obj) => {
            let name = obj.get("name").and_then(Value::as_str)?;
            let mut line = format!("- **{}**", name);
            if let Some(desc) = obj.get("description").and_then(Value::as_str) {
                line.push_str(&format!(": {}", desc));
            }
            if let Some(effort) = obj.get("effort").and_then(Value::as_str) {
                line.push_str(&format!(" _(effort: {})_", effort));
            }
            Some(line)
        }
        _ => None,
    }
}

/// Build an `issueData`-compatible payload (`title`, `body`, `labels`)
pub fn build_github_payload(repository: &str, synthesis: &JsonMap, agents: &[String]) -> JsonMap {
    let title = synthesis
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| format!("Feature suggestions for {}", repository));

    let mut body = String::new();

    if let Some(summary) = synthesis.get("summary").and_then(Value::as_str) {
        body.push_str(&format!("## Summary\n\n{}\n\n", summary.trim()));
    }

    let features: Vec<String> = synthesis
        .get("suggested_features")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(feature_line).collect())
        .unwrap_or_default();
    if !features.is_empty() {
        body.push_str(&format!("## Suggested features\n\n{}\n\n", features.join("\n")));
    }

    let risks: Vec<String> = synthesis
        .get("risks")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(|r| format!("- {}", r))
                .collect()
        })
        .unwrap_or_default();
    if !risks.is_empty() {
        body.push_str(&format!("## Risks\n\n{}\n\n", risks.join("\n")));
    }

    if agents.is_empty() {
        body.push_str("---\n_Generated by RepoLens._\n");
    } else {
        body.push_str(&format!(
            "---\n_Generated by RepoLens using: {}._\n",
            agents.join(", ")
        ));
    }

    let mut labels = vec![
        Value::String("enhancement".to_string()),
        Value::String("ai-suggested".to_string()),
    ];
    if let Some(priority) = synthesis.get("priority").and_then(Value::as_str) {
        labels.push(Value::String(format!("priority: {}", priority.to_lowercase())));
    }

    let mut payload = JsonMap::new();
    payload.insert("title".to_string(), Value::String(title));
    payload.insert("body".to_string(), Value::String(body));
    payload.insert("labels".to_string(), Value::Array(labels));
    payload
}
