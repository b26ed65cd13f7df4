use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CreateProjectRequest, UpdateProjectRequest};
use super::repo_types::{NewProject, Project, ProjectPatch};
use crate::{dto::MessageResponse, error::AppError, extractors::AppJson, state::AppState};

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/add", post(add_project))
        .route("/projects/update/:id", patch(update_project))
        .route("/projects/delete/:id", delete(delete_project))
        .route("/projects/:uid", get(list_projects))
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.store.projects.list_by_owner(uid).await?))
}

#[instrument(skip(state, body))]
pub async fn add_project(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let new = NewProject::try_from(body)?;
    let project = state.store.projects.create(new).await?;
    info!(id = %project.id, user_id = %project.user_id, milestones = project.milestones.len(), "project created");
    Ok(Json(project))
}

#[instrument(skip(state, body))]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let patch = ProjectPatch::try_from(body)?;
    match state.store.projects.update_partial(id, patch).await? {
        Some(project) => Ok(Json(project)),
        None => Err(AppError::not_found("Project not found")),
    }
}

#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.store.projects.delete_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Project not found"));
    }
    info!(%id, "project deleted");
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
