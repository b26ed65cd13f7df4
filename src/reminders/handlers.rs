use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CreateReminderRequest, UpdateReminderRequest};
use super::repo_types::{NewReminder, Reminder, ReminderPatch};
use crate::{dto::MessageResponse, error::AppError, extractors::AppJson, state::AppState};

pub fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/reminders/add", post(add_reminder))
        .route("/reminders/update/:id", patch(update_reminder))
        .route("/reminders/delete/:id", delete(delete_reminder))
        .route("/reminders/:uid", get(list_reminders))
}

#[instrument(skip(state))]
pub async fn list_reminders(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<Reminder>>, AppError> {
    Ok(Json(state.store.reminders.list_by_owner(uid).await?))
}

#[instrument(skip(state, body))]
pub async fn add_reminder(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateReminderRequest>,
) -> Result<Json<Reminder>, AppError> {
    let new = NewReminder::try_from(body)?;
    let reminder = state.store.reminders.create(new).await?;
    info!(id = %reminder.id, kind = ?reminder.kind, "reminder added");
    Ok(Json(reminder))
}

#[instrument(skip(state, body))]
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<UpdateReminderRequest>,
) -> Result<Json<Reminder>, AppError> {
    let patch = ReminderPatch::try_from(body)?;
    match state.store.reminders.update_partial(id, patch).await? {
        Some(reminder) => Ok(Json(reminder)),
        None => Err(AppError::not_found("Reminder not found")),
    }
}

#[instrument(skip(state))]
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.store.reminders.delete_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Reminder not found"));
    }
    Ok(Json(MessageResponse::new("Reminder deleted successfully")))
}
