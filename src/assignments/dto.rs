use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{AssignmentPatch, NewAssignment};
use crate::error::{non_blank, required, required_text, AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub user_id: Option<Uuid>,
    pub title: Option<String>,
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    pub due_date: Option<OffsetDateTime>,
    pub description: Option<String>,
}

impl TryFrom<CreateAssignmentRequest> for NewAssignment {
    type Error = AppError;

    fn try_from(req: CreateAssignmentRequest) -> Result<Self, AppError> {
        Ok(Self {
            user_id: required(req.user_id, "userId")?,
            title: required_text(req.title, "title")?,
            subject: req.subject,
            due_date: required(req.due_date, "dueDate")?,
            description: req.description,
        })
    }
}

/// `completed: false` is a real update, not "absent".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    pub due_date: Option<OffsetDateTime>,
    pub completed: Option<bool>,
}

impl TryFrom<UpdateAssignmentRequest> for AssignmentPatch {
    type Error = AppError;

    fn try_from(req: UpdateAssignmentRequest) -> Result<Self, AppError> {
        Ok(Self {
            title: non_blank(req.title, "title")?,
            subject: req.subject,
            description: req.description,
            due_date: req.due_date,
            completed: req.completed,
        })
    }
}
