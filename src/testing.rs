//! Fakes and request helpers shared by handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bytes::Bytes;
use serde_json::{Map, Value};
use tower::ServiceExt;

use crate::ai::client::TextGenerator;
use crate::ai::error::AiError;
use crate::storage::StorageClient;

pub enum FakeReply {
    Text(String),
    Provider { status: u16, body: Value },
    Transport,
}

/// Counts calls and remembers the last prompt and options it was given.
pub struct FakeGenerator {
    configured: bool,
    reply: FakeReply,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Map<String, Value>)>>,
}

impl FakeGenerator {
    pub fn unconfigured() -> Self {
        Self::new(false, FakeReply::Text(String::new()))
    }

    pub fn replying(reply: FakeReply) -> Self {
        Self::new(true, reply)
    }

    fn new(configured: bool, reply: FakeReply) -> Self {
        Self {
            configured,
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, Map<String, Value>)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str, options: Map<String, Value>) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((prompt.to_string(), options));
        if !self.configured {
            return Err(AiError::MissingApiKey);
        }
        match &self.reply {
            FakeReply::Text(t) => Ok(t.clone()),
            FakeReply::Provider { status, body } => Err(AiError::Provider {
                status: *status,
                body: body.clone(),
            }),
            FakeReply::Transport => Err(AiError::Transport {
                message: "connection refused".into(),
            }),
        }
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub objects: Mutex<HashMap<String, (Bytes, String)>>,
}

#[async_trait]
impl StorageClient for FakeStorage {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn presign_get(&self, key: &str, _seconds: u64) -> anyhow::Result<String> {
        Ok(format!("https://fake.local/{}", key))
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
