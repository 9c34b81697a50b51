//! API route handlers

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use repolens_core::{panic_message, AnalysisReport, IssueOutcome};
use serde::Serialize;
use std::any::Any;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validation::{
    buffered_body, parse_json_object, validate_analysis_request, validate_issue_request,
};

// ========== Envelopes ==========

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub analyzer_ready: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

#[derive(Debug, Serialize)]
pub struct IssueResponse {
    pub success: bool,
    pub issue: IssueOutcome,
}

// ========== Collaborator execution ==========

/// Run a blocking collaborator call off the async workers.
///
/// Errors and panics both come back as the message text; the caller decides
/// which envelope prefix applies.
async fn run_collaborator<T, F>(call: F) -> Result<T, String>
where
    F: FnOnce() -> repolens_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(e) if e.is_panic() => Err(panic_message(&*e.into_panic())),
        Err(e) => Err(e.to_string()),
    }
}

// ========== Health ==========

/// Liveness plus analyzer readiness; never fails
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.service_name.to_string(),
        analyzer_ready: state.analyzer.is_ready(),
    })
}

// ========== Analysis ==========

/// Analyze a GitHub repository
///
/// Expected payload: `{"repoUrl": "https://github.com/owner/repo"}`
pub async fn analyze_repository(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let body = buffered_body(body)?;
    let payload = parse_json_object(&headers, &body)?;
    let request = validate_analysis_request(&payload)?;

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, repo_url = %request.repo_url, "Analyzing repository");

    let Some(collaborators) = state.collaborators() else {
        tracing::error!(%request_id, "Analyzer not initialized");
        return Err(ApiError::NotReady);
    };

    let analyzer = collaborators.analyzer.clone();
    let repo_url = request.repo_url.clone();
    let outcome = run_collaborator(move || analyzer.analyze(&repo_url))
        .await
        .map_err(|message| {
            tracing::error!(%request_id, error = %message, "Unexpected error in analyze_repository");
            ApiError::Internal(message)
        })?;

    if !outcome.success {
        let message = outcome.failure_message();
        tracing::error!(%request_id, repo_url = %request.repo_url, error = %message, "Analysis failed");
        return Err(ApiError::AnalysisFailed(message));
    }

    tracing::info!(%request_id, repo_url = %request.repo_url, "Analysis completed");
    Ok(Json(AnalyzeResponse {
        success: true,
        report: outcome.into_report(),
    }))
}

// ========== Issues ==========

/// Create a GitHub issue from analysis results
///
/// Expected payload: `{"owner": "owner", "repo": "repo", "issueData": {...}}`
pub async fn create_github_issue(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<IssueResponse>> {
    let body = buffered_body(body)?;
    let payload = parse_json_object(&headers, &body)?;
    let request = validate_issue_request(&payload)?;

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, owner = %request.owner, repo = %request.repo, "Creating GitHub issue");

    let Some(collaborators) = state.collaborators() else {
        tracing::error!(%request_id, "Analyzer not initialized");
        return Err(ApiError::NotReady);
    };

    let issues = collaborators.issues.clone();
    let issue = run_collaborator(move || {
        issues.create_issue(&request.owner, &request.repo, &request.issue_data)
    })
    .await
    .map_err(|message| {
        tracing::error!(%request_id, error = %message, "Error creating GitHub issue");
        ApiError::IssueCreation(message)
    })?;

    tracing::info!(%request_id, number = issue.number, url = %issue.url, "GitHub issue created");
    Ok(Json(IssueResponse {
        success: true,
        issue,
    }))
}

// ========== Fallbacks ==========

/// Unmatched route
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known route, wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Terminal envelope for a panic that escaped a handler
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(panic = %panic_message(&*err), "Handler panicked");
    ApiError::Unhandled.into_response()
}
