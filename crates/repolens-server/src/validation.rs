//! Request validation
//!
//! Pure checks run before any collaborator is touched. Each returns the typed
//! request or the `ApiError::Validation` the client will see.

use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::{header, HeaderMap, StatusCode};
use repolens_core::{JsonMap, GITHUB_URL_PREFIX};
use serde_json::Value;

pub const MSG_BODY_TOO_LARGE: &str = "Request body too large";
pub const MSG_BODY_UNREADABLE: &str = "Failed to read request body";
pub const MSG_NOT_JSON: &str = "Request must be JSON";
pub const MSG_MALFORMED_JSON: &str = "Request body must be valid JSON";
pub const MSG_NOT_OBJECT: &str = "Request body must be a JSON object";
pub const MSG_REPO_URL_REQUIRED: &str = "repoUrl or repo_url is required";
pub const MSG_INVALID_GITHUB_URL: &str = "Invalid GitHub URL format";
pub const MSG_ISSUE_FIELDS_REQUIRED: &str = "owner, repo, and issueData are required";

/// Validated analyze-repository payload
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub repo_url: String,
}

/// Validated create-issue payload
#[derive(Debug, Clone, PartialEq)]
pub struct IssueCreationRequest {
    pub owner: String,
    pub repo: String,
    pub issue_data: Value,
}

/// Buffered request body, with extractor rejections reworded
pub fn buffered_body(body: Result<Bytes, BytesRejection>) -> ApiResult<Bytes> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::validation(MSG_BODY_TOO_LARGE)
        } else {
            ApiError::validation(MSG_BODY_UNREADABLE)
        }
    })
}

/// `application/json` or any `application/*+json` media type
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Check the content type and decode the body as a JSON object
pub fn parse_json_object(headers: &HeaderMap, body: &[u8]) -> ApiResult<JsonMap> {
    if !is_json_content_type(headers) {
        return Err(ApiError::validation(MSG_NOT_JSON));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::validation(MSG_NOT_OBJECT)),
        Err(_) => Err(ApiError::validation(MSG_MALFORMED_JSON)),
    }
}

fn non_empty_str<'a>(payload: &'a JsonMap, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `repoUrl` (or `repo_url`) must be a non-empty github.com URL
pub fn validate_analysis_request(payload: &JsonMap) -> ApiResult<AnalysisRequest> {
    let repo_url = non_empty_str(payload, "repoUrl")
        .or_else(|| non_empty_str(payload, "repo_url"))
        .ok_or_else(|| ApiError::validation(MSG_REPO_URL_REQUIRED))?;

    if !repo_url.starts_with(GITHUB_URL_PREFIX) {
        return Err(ApiError::validation(MSG_INVALID_GITHUB_URL));
    }

    Ok(AnalysisRequest {
        repo_url: repo_url.to_string(),
    })
}

/// `owner`, `repo` and a non-null `issueData` are required together
pub fn validate_issue_request(payload: &JsonMap) -> ApiResult<IssueCreationRequest> {
    let owner = non_empty_str(payload, "owner");
    let repo = non_empty_str(payload, "repo");
    let issue_data = payload.get("issueData").filter(|v| !v.is_null());

    match (owner, repo, issue_data) {
        (Some(owner), Some(repo), Some(issue_data)) => Ok(IssueCreationRequest {
            owner: owner.to_string(),
            repo: repo.to_string(),
            issue_data: issue_data.clone(),
        }),
        _ => Err(ApiError::validation(MSG_ISSUE_FIELDS_REQUIRED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn json_headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_content_types() {
        assert!(is_json_content_type(&json_headers("application/json")));
        assert!(is_json_content_type(&json_headers("application/json; charset=utf-8")));
        assert!(is_json_content_type(&json_headers("Application/JSON")));
        assert!(is_json_content_type(&json_headers("application/vnd.api+json")));
        assert!(!is_json_content_type(&json_headers("text/plain")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_json_object(&json_headers("text/plain"), br#"{"a":1}"#).unwrap_err();
        assert_eq!(err, ApiError::validation(MSG_NOT_JSON));
    }

    #[test]
    fn test_parse_rejects_malformed_and_non_object() {
        let headers = json_headers("application/json");
        assert_eq!(
            parse_json_object(&headers, b"{oops").unwrap_err(),
            ApiError::validation(MSG_MALFORMED_JSON)
        );
        assert_eq!(
            parse_json_object(&headers, b"[1,2]").unwrap_err(),
            ApiError::validation(MSG_NOT_OBJECT)
        );
    }

    #[test]
    fn test_repo_url_and_alias() {
        let req = validate_analysis_request(&object(json!({
            "repoUrl": "https://github.com/acme/widgets"
        })))
        .unwrap();
        assert_eq!(req.repo_url, "https://github.com/acme/widgets");

        let req = validate_analysis_request(&object(json!({
            "repo_url": "https://github.com/acme/gadgets"
        })))
        .unwrap();
        assert_eq!(req.repo_url, "https://github.com/acme/gadgets");
    }

    #[test]
    fn test_empty_repo_url_falls_back_to_alias() {
        let req = validate_analysis_request(&object(json!({
            "repoUrl": "",
            "repo_url": "https://github.com/acme/gadgets"
        })))
        .unwrap();
        assert_eq!(req.repo_url, "https://github.com/acme/gadgets");
    }

    #[test]
    fn test_missing_or_wrong_type_repo_url() {
        for payload in [
            json!({}),
            json!({"repoUrl": ""}),
            json!({"repoUrl": null}),
            json!({"repoUrl": 42}),
            json!({"url": "https://github.com/acme/widgets"}),
        ] {
            assert_eq!(
                validate_analysis_request(&object(payload)).unwrap_err(),
                ApiError::validation(MSG_REPO_URL_REQUIRED)
            );
        }
    }

    #[test]
    fn test_non_github_url() {
        for url in [
            "http://github.com/acme/widgets",
            "https://gitlab.com/acme/widgets",
            "github.com/acme/widgets",
            " https://github.com/acme/widgets",
        ] {
            assert_eq!(
                validate_analysis_request(&object(json!({"repoUrl": url}))).unwrap_err(),
                ApiError::validation(MSG_INVALID_GITHUB_URL),
                "{}",
                url
            );
        }
    }

    #[test]
    fn test_issue_request_complete() {
        let req = validate_issue_request(&object(json!({
            "owner": "acme",
            "repo": "widgets",
            "issueData": {"title": "Add caching"}
        })))
        .unwrap();
        assert_eq!(req.owner, "acme");
        assert_eq!(req.repo, "widgets");
        assert_eq!(req.issue_data, json!({"title": "Add caching"}));
    }

    #[test]
    fn test_issue_request_partial() {
        for payload in [
            json!({"owner": "acme", "repo": "widgets"}),
            json!({"owner": "acme", "issueData": {}}),
            json!({"repo": "widgets", "issueData": {}}),
            json!({"owner": "", "repo": "widgets", "issueData": {}}),
            json!({"owner": "acme", "repo": "widgets", "issueData": null}),
            json!({}),
        ] {
            assert_eq!(
                validate_issue_request(&object(payload)).unwrap_err(),
                ApiError::validation(MSG_ISSUE_FIELDS_REQUIRED)
            );
        }
    }
}
