use std::net::SocketAddr;

mod ai;
mod app;
mod assignments;
mod auth;
mod config;
mod db;
mod dto;
mod error;
mod extractors;
mod materials;
mod projects;
mod reminders;
mod state;
mod storage;
mod store;
#[cfg(test)]
mod testing;
mod timetable;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "student_assistant=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;
    let addr: SocketAddr =
        format!("{}:{}", state.config.host, state.config.port).parse()?;

    let app = app::build_app(state);
    app::serve(app, addr).await
}
