//! Error translation onto the JSON envelope
//!
//! Every failure the gateway reports is an `ApiError`; its `Display` text is
//! the envelope's `error` string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed or incomplete request
    #[error("{0}")]
    Validation(String),

    /// Analyzer handle is not ready
    #[error("Analysis service not properly initialized")]
    NotReady,

    /// Analysis collaborator completed but reported failure
    #[error("{0}")]
    AnalysisFailed(String),

    /// Fault while analyzing
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Fault while creating an issue
    #[error("Failed to create GitHub issue: {0}")]
    IssueCreation(String),

    #[error("Endpoint not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Fault that escaped every handler
    #[error("Internal server error")]
    Unhandled,
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotReady
            | ApiError::AnalysisFailed(_)
            | ApiError::Internal(_)
            | ApiError::IssueCreation(_)
            | ApiError::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string()
        }));

        (self.status(), body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotReady.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::Internal("boom".into()).to_string(),
            "Internal server error: boom"
        );
        assert_eq!(
            ApiError::IssueCreation("401".into()).to_string(),
            "Failed to create GitHub issue: 401"
        );
        assert_eq!(
            ApiError::NotReady.to_string(),
            "Analysis service not properly initialized"
        );
    }
}
