mod dto;
pub mod handlers;
mod repo;
mod services;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::material_routes()
}
