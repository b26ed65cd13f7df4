//! HTTP-facing error type shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::ai::error::AiError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Ai(#[from] AiError),

    #[error("object storage is not configured")]
    StorageUnavailable,

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Ai(AiError::MissingApiKey) | Self::StorageUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Ai(_) | Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => json!({ "msg": msg }),
            Self::Ai(AiError::MissingApiKey) => json!({
                "error": "AI service unavailable",
                "message": "GEMINI_API_KEY is not configured on the server. Set GEMINI_API_KEY in .env or the environment.",
            }),
            Self::Ai(AiError::Provider { status, body }) => json!({
                "error": "AI service error",
                "provider": { "status": status, "data": body },
            }),
            Self::Ai(AiError::Transport { .. }) => json!({ "error": "AI service error" }),
            Self::StorageUnavailable => json!({
                "error": "File storage unavailable",
                "message": "Object storage is not configured on the server. Set the MINIO_* variables.",
            }),
            Self::Store(_) | Self::Internal(_) => json!({ "error": "Server error" }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

/// Trims a required text field, rejecting absent or blank values.
pub fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::bad_request(format!("{} is required", field))),
    }
}

pub fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::bad_request(format!("{} is required", field)))
}

/// For update bodies: absent stays absent, but a present text field cannot be blank.
pub fn non_blank(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(AppError::bad_request(format!("{} cannot be empty", field)))
        }
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_carry_msg() {
        let (status, body) = render(AppError::bad_request("Please provide a query")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "Please provide a query" }));

        let (status, body) = render(AppError::not_found("Project not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Project not found");
    }

    #[tokio::test]
    async fn missing_api_key_is_service_unavailable() {
        let (status, body) = render(AppError::Ai(AiError::MissingApiKey)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "AI service unavailable");
    }

    #[tokio::test]
    async fn provider_fault_passes_upstream_status_and_body() {
        let err = AiError::Provider {
            status: 429,
            body: json!({ "error": { "message": "quota" } }),
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI service error");
        assert_eq!(body["provider"]["status"], 429);
        assert_eq!(body["provider"]["data"]["error"]["message"], "quota");
    }

    #[tokio::test]
    async fn transport_fault_has_no_provider_section() {
        let err = AiError::Transport {
            message: "operation timed out".into(),
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("provider").is_none());
    }

    #[tokio::test]
    async fn internal_details_do_not_leak() {
        let (status, body) = render(anyhow::anyhow!("password=hunter2").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Server error" }));
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text(Some("  Maths ".into()), "subject").unwrap(), "Maths");
        assert!(required_text(Some("   ".into()), "subject").is_err());
        assert!(required_text(None, "subject").is_err());
        assert_eq!(non_blank(None, "title").unwrap(), None);
        assert!(non_blank(Some("".into()), "title").is_err());
    }
}
