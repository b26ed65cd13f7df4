use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, error, instrument};

use super::error::AiError;
use super::extract::extract_text;
use crate::config::AiConfig;

/// Turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// `false` when a call would fail with [`AiError::MissingApiKey`].
    fn is_configured(&self) -> bool;

    /// `options` are merged into the request payload and win on key collision.
    async fn generate(&self, prompt: &str, options: Map<String, Value>) -> Result<String, AiError>;
}

/// Client for Gemini-style `models/{model}:{method}` endpoints.
pub struct GeminiClient {
    http: Client,
    config: AiConfig,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.method
        )
    }
}

/// `generateText` takes `{prompt: {text}}`; every other method takes the
/// `contents/parts` shape.
pub fn build_payload(method: &str, prompt: &str, options: Map<String, Value>) -> Value {
    let mut payload = if method == "generateText" {
        json!({ "prompt": { "text": prompt } })
    } else {
        json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
    };
    if let Value::Object(fields) = &mut payload {
        fields.extend(options);
    }
    payload
}

/// Empty bodies become `Null`; non-JSON bodies are kept as a JSON string.
fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    #[instrument(skip(self, prompt, options), fields(model = %self.config.model, method = %self.config.method))]
    async fn generate(&self, prompt: &str, options: Map<String, Value>) -> Result<String, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let payload = build_payload(&self.config.method, prompt, options);

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "provider request failed");
                AiError::from(e)
            })?;

        let status = response.status();
        let body = parse_body(response.text().await?);

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "provider returned an error");
            return Err(AiError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "provider responded");
        Ok(extract_text(&body))
    }
}
