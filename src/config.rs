use std::time::Duration;

use anyhow::Context;
use rand::Rng;
use serde::Deserialize;

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_AI_METHOD: &str = "generateContent";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Settings for the generative-language provider.
///
/// `api_key` is optional: without it the AI routes answer 503 while the rest
/// of the service keeps working.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    pub method: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AI_BASE_URL.into(),
            model: DEFAULT_AI_MODEL.into(),
            method: DEFAULT_AI_METHOD.into(),
            api_key: None,
            timeout: Duration::from_secs(20),
        }
    }
}

/// S3/MinIO bucket holding uploaded study materials.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub ai: AiConfig,
    pub storage: Option<StorageConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = listen_port(optional_var("APP_PORT"), optional_var("PORT"))?;

        let secret = optional_var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
            random_secret()
        });
        let jwt = JwtConfig {
            secret,
            issuer: optional_var("JWT_ISSUER").unwrap_or_else(|| "student-assistant".into()),
            audience: optional_var("JWT_AUDIENCE").unwrap_or_else(|| "student-assistant-users".into()),
            ttl_minutes: match optional_var("JWT_TTL_MINUTES") {
                Some(v) => v.parse::<i64>().context("JWT_TTL_MINUTES must be an integer")?,
                None => 60,
            },
        };

        let defaults = AiConfig::default();
        let ai = AiConfig {
            base_url: optional_var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            model: optional_var("GEMINI_MODEL").unwrap_or(defaults.model),
            method: optional_var("GEMINI_METHOD").unwrap_or(defaults.method),
            api_key: optional_var("GEMINI_API_KEY"),
            timeout: match optional_var("GEMINI_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(
                    v.parse::<u64>().context("GEMINI_TIMEOUT_SECS must be an integer")?,
                ),
                None => defaults.timeout,
            },
        };

        let storage = match (
            optional_var("MINIO_ENDPOINT"),
            optional_var("MINIO_BUCKET"),
            optional_var("MINIO_ACCESS_KEY"),
            optional_var("MINIO_SECRET_KEY"),
        ) {
            (Some(endpoint), Some(bucket), Some(access_key), Some(secret_key)) => Some(StorageConfig {
                endpoint,
                bucket,
                access_key,
                secret_key,
                region: optional_var("MINIO_REGION").unwrap_or_else(|| "us-east-1".into()),
            }),
            _ => None,
        };

        Ok(Self {
            host: optional_var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            database_url: optional_var("DATABASE_URL"),
            jwt,
            ai,
            storage,
        })
    }
}

/// `APP_PORT` wins over the conventional `PORT`; 5000 when neither is set.
fn listen_port(app_port: Option<String>, port: Option<String>) -> anyhow::Result<u16> {
    match (app_port, port) {
        (Some(v), _) => v.parse::<u16>().context("APP_PORT must be a port number"),
        (None, Some(v)) => v.parse::<u16>().context("PORT must be a port number"),
        (None, None) => Ok(5000),
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn random_secret() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_defaults_match_public_gemini_endpoint() {
        let ai = AiConfig::default();
        assert_eq!(ai.model, "gemini-2.5-pro");
        assert_eq!(ai.method, "generateContent");
        assert_eq!(ai.timeout, Duration::from_secs(20));
        assert!(ai.api_key.is_none());
    }

    #[test]
    fn random_secret_is_hex_and_unique() {
        let a = random_secret();
        let b = random_secret();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn port_prefers_app_port_then_port() {
        assert_eq!(listen_port(None, None).unwrap(), 5000);
        assert_eq!(listen_port(None, Some("8081".into())).unwrap(), 8081);
        assert_eq!(listen_port(Some("9000".into()), Some("8081".into())).unwrap(), 9000);
        assert!(listen_port(None, Some("http".into())).is_err());
    }
}
