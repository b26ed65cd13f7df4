use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CreateClassRequest, UpdateClassRequest};
use super::repo_types::{NewTimetableEntry, TimetableEntry, TimetablePatch};
use crate::{dto::MessageResponse, error::AppError, extractors::AppJson, state::AppState};

pub fn timetable_routes() -> Router<AppState> {
    Router::new()
        .route("/timetable/add", post(add_class))
        .route("/timetable/update/:id", patch(update_class))
        .route("/timetable/delete/:id", delete(delete_class))
        .route("/timetable/:uid", get(list_classes))
}

#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    Path(uid): Path<Uuid>,
) -> Result<Json<Vec<TimetableEntry>>, AppError> {
    let entries = state.store.timetable.list_by_owner(uid).await?;
    Ok(Json(entries))
}

#[instrument(skip(state, body))]
pub async fn add_class(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateClassRequest>,
) -> Result<Json<TimetableEntry>, AppError> {
    let new = NewTimetableEntry::try_from(body)?;
    let entry = state.store.timetable.create(new).await?;
    info!(id = %entry.id, user_id = %entry.user_id, "class added");
    Ok(Json(entry))
}

#[instrument(skip(state, body))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(body): AppJson<UpdateClassRequest>,
) -> Result<Json<TimetableEntry>, AppError> {
    let patch = TimetablePatch::try_from(body)?;
    state
        .store
        .timetable
        .update_partial(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Class not found"))
}

#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if state.store.timetable.delete_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Class not found"));
    }
    info!(%id, "class deleted");
    Ok(Json(MessageResponse::new("Class deleted successfully")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    use crate::app::build_app;
    use crate::state::AppState;
    use crate::testing::{send_empty, send_json};

    #[tokio::test]
    async fn listing_is_ordered_by_day_then_time() {
        let app = build_app(AppState::fake());
        let owner = Uuid::new_v4();

        for (day, time) in [("Thursday", "10:00"), ("Monday", "13:00"), ("Monday", "09:00")] {
            let (status, _) = send_json(
                &app,
                "POST",
                "/api/timetable/add",
                json!({ "userId": owner, "subject": "Maths", "day": day, "time": time }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send_empty(&app, "GET", &format!("/api/timetable/{}", owner)).await;
        assert_eq!(status, StatusCode::OK);
        let order: Vec<(String, String)> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| (e["day"].as_str().unwrap().into(), e["time"].as_str().unwrap().into()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Monday".to_string(), "09:00".to_string()),
                ("Monday".to_string(), "13:00".to_string()),
                ("Thursday".to_string(), "10:00".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn add_requires_fields_and_known_day() {
        let app = build_app(AppState::fake());
        let owner = Uuid::new_v4();

        let (status, body) = send_json(
            &app,
            "POST",
            "/api/timetable/add",
            json!({ "userId": owner, "day": "Monday", "time": "09:00" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "subject is required");

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/timetable/add",
            json!({ "userId": owner, "subject": "Art", "day": "Sunday", "time": "09:00" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let app = build_app(AppState::fake());
        let owner = Uuid::new_v4();
        let (_, created) = send_json(
            &app,
            "POST",
            "/api/timetable/add",
            json!({ "userId": owner, "subject": "Chemistry", "day": "Tuesday", "time": "11:00", "room": "B12" }),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, updated) = send_json(
            &app,
            "PATCH",
            &format!("/api/timetable/update/{}", id),
            json!({ "room": "C3" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["room"], "C3");
        assert_eq!(updated["subject"], "Chemistry");

        let (status, body) = send_empty(&app, "DELETE", &format!("/api/timetable/delete/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "Class deleted successfully");

        let (status, body) = send_empty(&app, "DELETE", &format!("/api/timetable/delete/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Class not found");
    }
}
