use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Milestone, NewProject, ProjectPatch};
use crate::error::{non_blank, required, required_text, AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    pub deadline: Option<OffsetDateTime>,
    pub milestones: Option<Vec<Milestone>>,
}

impl TryFrom<CreateProjectRequest> for NewProject {
    type Error = AppError;

    fn try_from(req: CreateProjectRequest) -> Result<Self, AppError> {
        Ok(Self {
            user_id: required(req.user_id, "userId")?,
            name: required_text(req.name, "name")?,
            description: req.description,
            deadline: required(req.deadline, "deadline")?,
            milestones: req.milestones.unwrap_or_default(),
        })
    }
}

/// `progress: 0` and `milestones: []` are applied like any other value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    pub deadline: Option<OffsetDateTime>,
    pub progress: Option<i32>,
    pub milestones: Option<Vec<Milestone>>,
}

impl TryFrom<UpdateProjectRequest> for ProjectPatch {
    type Error = AppError;

    fn try_from(req: UpdateProjectRequest) -> Result<Self, AppError> {
        if let Some(p) = req.progress {
            if !(0..=100).contains(&p) {
                return Err(AppError::bad_request("progress must be between 0 and 100"));
            }
        }
        Ok(Self {
            name: non_blank(req.name, "name")?,
            description: req.description,
            deadline: req.deadline,
            progress: req.progress,
            milestones: req.milestones,
        })
    }
}
