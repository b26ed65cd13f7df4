use axum::{extract::State, routing::post, Json, Router};
use serde_json::Map;
use tracing::{info, instrument};

use super::dto::{
    AnswerResponse, ChatRequest, PlanResponse, PlannerRequest, QuizRequest, QuizResponse,
    SummarizeRequest, SummaryResponse,
};
use super::error::AiError;
use super::services::{planner_prompt, quiz_options, quiz_prompt, summarize_prompt};
use crate::{error::AppError, extractors::AppJson, state::AppState};

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/ai/summarize", post(summarize))
        .route("/ai/chat", post(chat))
        .route("/ai/quiz", post(quiz))
        .route("/ai/planner", post(planner))
}

/// Bodies arrive as `Result` so an unconfigured server answers 503 before the
/// body is even looked at.
type Body<T> = Result<AppJson<T>, AppError>;

fn ensure_configured(state: &AppState) -> Result<(), AppError> {
    if state.ai.is_configured() {
        Ok(())
    } else {
        Err(AiError::MissingApiKey.into())
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[instrument(skip(state, body))]
pub async fn summarize(
    State(state): State<AppState>,
    body: Body<SummarizeRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    ensure_configured(&state)?;
    let AppJson(body) = body?;
    let text = present(body.text)
        .ok_or_else(|| AppError::bad_request("Please provide text to summarize"))?;

    let summary = state.ai.generate(&summarize_prompt(&text), Map::new()).await?;
    info!(chars = summary.len(), "summary generated");
    Ok(Json(SummaryResponse { summary }))
}

#[instrument(skip(state, body))]
pub async fn chat(
    State(state): State<AppState>,
    body: Body<ChatRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    ensure_configured(&state)?;
    let AppJson(body) = body?;
    let query = present(body.query).ok_or_else(|| AppError::bad_request("Please provide a query"))?;

    let answer = state.ai.generate(&query, Map::new()).await?;
    Ok(Json(AnswerResponse { answer }))
}

#[instrument(skip(state, body))]
pub async fn quiz(
    State(state): State<AppState>,
    body: Body<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    ensure_configured(&state)?;
    let AppJson(body) = body?;
    let topic = present(body.topic).ok_or_else(|| AppError::bad_request("Please provide a topic"))?;

    let quiz = state.ai.generate(&quiz_prompt(&topic), quiz_options()).await?;
    info!(%topic, "quiz generated");
    Ok(Json(QuizResponse { quiz }))
}

#[instrument(skip(state, body))]
pub async fn planner(
    State(state): State<AppState>,
    body: Body<PlannerRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    ensure_configured(&state)?;
    let AppJson(body) = body?;
    let (subjects, days) = body
        .validate()
        .ok_or_else(|| AppError::bad_request("Please provide subjects (array) and daysAvailable"))?;

    let plan = state.ai.generate(&planner_prompt(&subjects, &days), Map::new()).await?;
    Ok(Json(PlanResponse { plan }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;

    use crate::app::build_app;
    use crate::state::AppState;
    use crate::testing::{send, send_json, FakeGenerator, FakeReply};

    fn raw_post(uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn app_with(ai: Arc<FakeGenerator>) -> axum::Router {
        build_app(AppState::fake().with_ai(ai))
    }

    #[tokio::test]
    async fn chat_without_api_key_is_503_and_makes_no_call() {
        let ai = Arc::new(FakeGenerator::unconfigured());
        let app = app_with(ai.clone());

        let (status, body) = send_json(&app, "POST", "/api/ai/chat", json!({ "query": "hi" })).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "AI service unavailable");
        assert_eq!(ai.calls(), 0);
    }

    #[tokio::test]
    async fn missing_key_wins_over_missing_input() {
        let ai = Arc::new(FakeGenerator::unconfigured());
        let app = app_with(ai.clone());

        let (status, _) = send_json(&app, "POST", "/api/ai/summarize", json!({})).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn chat_returns_answer() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Text("42".into())));
        let app = app_with(ai.clone());

        let (status, body) =
            send_json(&app, "POST", "/api/ai/chat", json!({ "query": "meaning of life?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "answer": "42" }));
        let (prompt, options) = ai.last_call().unwrap();
        assert_eq!(prompt, "meaning of life?");
        assert!(options.is_empty());
    }

    #[tokio::test]
    async fn summarize_requires_text() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Text("short".into())));
        let app = app_with(ai.clone());

        let (status, body) = send_json(&app, "POST", "/api/ai/summarize", json!({ "text": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Please provide text to summarize");
        assert_eq!(ai.calls(), 0);

        let (status, body) =
            send_json(&app, "POST", "/api/ai/summarize", json!({ "text": "long text" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "short");
    }

    #[tokio::test]
    async fn quiz_passes_token_limit() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Text("[]".into())));
        let app = app_with(ai.clone());

        let (status, body) = send_json(&app, "POST", "/api/ai/quiz", json!({ "topic": "cells" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quiz"], "[]");
        let (_, options) = ai.last_call().unwrap();
        assert_eq!(options["maxOutputTokens"], 800);
    }

    #[tokio::test]
    async fn planner_validates_subjects_and_days() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Text("plan".into())));
        let app = app_with(ai.clone());

        for bad in [
            json!({ "subjects": [], "daysAvailable": 3 }),
            json!({ "subjects": ["Maths"] }),
            json!({ "subjects": ["Maths"], "daysAvailable": 0 }),
            json!({ "daysAvailable": "5" }),
        ] {
            let (status, _) = send_json(&app, "POST", "/api/ai/planner", bad).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/ai/planner",
            json!({ "subjects": ["Maths", "Biology"], "daysAvailable": "5" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"], "plan");
        let (prompt, _) = ai.last_call().unwrap();
        assert!(prompt.contains("Maths, Biology"));
        assert!(prompt.contains("5 days"));
    }

    #[tokio::test]
    async fn provider_fault_is_500_with_diagnostics() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Provider {
            status: 400,
            body: json!({ "error": { "message": "API key not valid" } }),
        }));
        let app = app_with(ai);

        let (status, body) = send_json(&app, "POST", "/api/ai/chat", json!({ "query": "hi" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI service error");
        assert_eq!(body["provider"]["status"], 400);
        assert_eq!(body["provider"]["data"]["error"]["message"], "API key not valid");
    }

    #[tokio::test]
    async fn transport_fault_is_plain_500() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Transport));
        let app = app_with(ai);

        let (status, body) = send_json(&app, "POST", "/api/ai/quiz", json!({ "topic": "x" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "AI service error" }));
    }

    #[tokio::test]
    async fn unconfigured_server_answers_503_even_to_unreadable_bodies() {
        let ai = Arc::new(FakeGenerator::unconfigured());
        let app = app_with(ai.clone());

        for request in [
            raw_post("/api/ai/chat", None, r#"{"query":"hi"}"#),
            raw_post("/api/ai/chat", Some("application/json"), "{oops"),
            raw_post("/api/ai/planner", Some("application/json"), r#"{"subjects":"Maths"}"#),
        ] {
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body["error"], "AI service unavailable");
        }
        assert_eq!(ai.calls(), 0);
    }

    #[tokio::test]
    async fn unreadable_body_is_400_with_msg_when_configured() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Text("unused".into())));
        let app = app_with(ai.clone());

        let (status, body) = send(&app, raw_post("/api/ai/chat", Some("application/json"), "{oops")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["msg"].is_string());

        let (status, body) = send(&app, raw_post("/api/ai/quiz", None, r#"{"topic":"x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["msg"].is_string());
        assert_eq!(ai.calls(), 0);
    }

    #[tokio::test]
    async fn planner_subjects_must_be_an_array() {
        let ai = Arc::new(FakeGenerator::replying(FakeReply::Text("plan".into())));
        let app = app_with(ai.clone());

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/ai/planner",
            json!({ "subjects": "Maths", "daysAvailable": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Please provide subjects (array) and daysAvailable");
        assert_eq!(ai.calls(), 0);
    }
}
