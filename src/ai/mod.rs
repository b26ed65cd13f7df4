pub mod client;
mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::ai_routes()
}
