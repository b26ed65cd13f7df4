use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{MaterialItem, UpdateMaterialRequest};
use super::repo_types::{Material, MaterialPatch};
use super::services::{store_upload, with_download_urls, Upload};
use crate::{dto::MessageResponse, error::AppError, extractors::AppJson, state::AppState};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/materials/upload",
            post(upload_material).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/materials/update/:id", patch(update_material))
        .route("/materials/delete/:id", delete(delete_material))
        .route("/materials/:uid", get(list_materials))
}

#[instrument(skip(state))]
pub async fn list_materials(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<MaterialItem>>, AppError> {
    let materials = state.store.materials.list_by_owner(uid).await?;
    Ok(Json(with_download_urls(state.storage.as_deref(), materials).await))
}

/// POST /materials/upload (multipart): `userId`, optional `title`, `file`.
#[instrument(skip(state, mp))]
pub async fn upload_material(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<Material>, AppError> {
    let storage = state.storage.clone().ok_or(AppError::StorageUnavailable)?;

    let mut user_id = None;
    let mut title = None;
    let mut file = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        match field.name() {
            Some("userId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
                let id = Uuid::parse_str(text.trim())
                    .map_err(|_| AppError::bad_request("userId is not a valid id"))?;
                user_id = Some(id);
            }
            Some("title") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
                title = Some(text);
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload".into());
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
                file = Some((file_name, content_type, body));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::bad_request("userId is required"))?;
    let (file_name, content_type, body) = file
        .filter(|(_, _, body)| !body.is_empty())
        .ok_or_else(|| AppError::bad_request("file is required"))?;
    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| file_name.clone());

    let material = store_upload(
        storage.as_ref(),
        state.store.materials.as_ref(),
        Upload {
            user_id,
            title,
            file_name,
            content_type,
            body,
        },
    )
    .await?;
    info!(id = %material.id, %user_id, size = material.size_bytes, "material uploaded");
    Ok(Json(material))
}

#[instrument(skip(state, body))]
pub async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<UpdateMaterialRequest>,
) -> Result<Json<Material>, AppError> {
    let patch = MaterialPatch::try_from(body)?;
    match state.store.materials.update_partial(id, patch).await? {
        Some(material) => Ok(Json(material)),
        None => Err(AppError::not_found("Material not found")),
    }
}

#[instrument(skip(state))]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let material = state
        .store
        .materials
        .delete_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Material not found"))?;

    match &state.storage {
        Some(storage) => {
            if let Err(e) = storage.delete_object(&material.object_key).await {
                warn!(error = %e, key = %material.object_key, "stored object left behind");
            }
        }
        None => warn!(key = %material.object_key, "object storage not configured; object left behind"),
    }
    info!(%id, "material deleted");
    Ok(Json(MessageResponse::new("Material deleted successfully")))
}
