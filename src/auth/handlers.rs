use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{AuthResponse, Credentials, PublicUser};
use super::services::{
    hash_password, is_valid_email, verify_password, AuthUser, JwtKeys, MIN_PASSWORD_LEN,
};
use crate::{
    error::{required, AppError},
    extractors::AppJson,
    state::AppState,
    store::StoreError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

/// Lowercased, trimmed email plus the raw password.
fn read_credentials(body: Credentials) -> Result<(String, String), AppError> {
    let email = required(body.email, "email")?.trim().to_lowercase();
    let password = required(body.password, "password")?;
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::bad_request("Invalid email"));
    }
    Ok((email, password))
}

fn issue(state: &AppState, user: PublicUser) -> Result<Json<AuthResponse>, AppError> {
    let token = JwtKeys::from(&state.config.jwt).sign(user.id)?;
    Ok(Json(AuthResponse { token, user }))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let (email, password) = read_credentials(body)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request("Password too short"));
    }

    if state.store.users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&password)?;
    // a concurrent registration can still win between the lookup and the insert
    let user = match state.store.users.create(&email, &hash).await {
        Ok(user) => user,
        Err(StoreError::Duplicate) => {
            warn!(%email, "email registered concurrently");
            return Err(AppError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, "user registered");
    issue(&state, user.into())
}

#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let (email, password) = read_credentials(body)?;

    let Some(user) = state.store.users.find_by_email(&email).await? else {
        warn!(%email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = %user.id, "user logged in");
    issue(&state, user.into())
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    match state.store.users.find_by_id(user_id).await? {
        Some(user) => Ok(Json(user.into())),
        None => {
            warn!(%user_id, "token for unknown user");
            Err(AppError::Unauthorized("User not found".into()))
        }
    }
}
