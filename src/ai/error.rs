use serde_json::Value;
use thiserror::Error;

/// Failures of a provider call, kept apart up to the HTTP boundary.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured; no request was attempted.
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    /// The provider answered with a non-2xx status.
    #[error("provider returned status {status}")]
    Provider { status: u16, body: Value },

    /// The request never completed (timeout, connection failure).
    #[error("provider request failed: {message}")]
    Transport { message: String },
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("timed out: {}", err)
        } else {
            err.to_string()
        };
        AiError::Transport { message }
    }
}
