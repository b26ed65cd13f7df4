use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CreateAssignmentRequest, UpdateAssignmentRequest};
use super::repo_types::{Assignment, AssignmentPatch, NewAssignment};
use crate::{dto::MessageResponse, error::AppError, extractors::AppJson, state::AppState};

pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments/add", post(add_assignment))
        .route("/assignments/update/:id", patch(update_assignment))
        .route("/assignments/delete/:id", delete(delete_assignment))
        .route("/assignments/:uid", get(list_assignments))
}

#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    Ok(Json(state.store.assignments.list_by_owner(uid).await?))
}

#[instrument(skip(state, body))]
pub async fn add_assignment(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateAssignmentRequest>,
) -> Result<Json<Assignment>, AppError> {
    let new = NewAssignment::try_from(body)?;
    let assignment = state.store.assignments.create(new).await?;
    info!(id = %assignment.id, user_id = %assignment.user_id, "assignment created");
    Ok(Json(assignment))
}

#[instrument(skip(state, body))]
pub async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<UpdateAssignmentRequest>,
) -> Result<Json<Assignment>, AppError> {
    let patch = AssignmentPatch::try_from(body)?;
    match state.store.assignments.update_partial(id, patch).await? {
        Some(assignment) => Ok(Json(assignment)),
        None => Err(AppError::not_found("Assignment not found")),
    }
}

#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.store.assignments.delete_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Assignment not found"));
    }
    info!(%id, "assignment deleted");
    Ok(Json(MessageResponse::new("Assignment deleted successfully")))
}
