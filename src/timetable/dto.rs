use serde::Deserialize;
use uuid::Uuid;

use super::repo_types::{NewTimetableEntry, TimetablePatch, Weekday};
use crate::error::{non_blank, required, required_text, AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub user_id: Option<Uuid>,
    pub subject: Option<String>,
    pub day: Option<Weekday>,
    pub time: Option<String>,
    pub faculty: Option<String>,
    pub room: Option<String>,
}

impl TryFrom<CreateClassRequest> for NewTimetableEntry {
    type Error = AppError;

    fn try_from(req: CreateClassRequest) -> Result<Self, AppError> {
        Ok(Self {
            user_id: required(req.user_id, "userId")?,
            subject: required_text(req.subject, "subject")?,
            day: required(req.day, "day")?,
            time: required_text(req.time, "time")?,
            faculty: req.faculty,
            room: req.room,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateClassRequest {
    pub subject: Option<String>,
    pub day: Option<Weekday>,
    pub time: Option<String>,
    pub faculty: Option<String>,
    pub room: Option<String>,
}

impl TryFrom<UpdateClassRequest> for TimetablePatch {
    type Error = AppError;

    fn try_from(req: UpdateClassRequest) -> Result<Self, AppError> {
        Ok(Self {
            subject: non_blank(req.subject, "subject")?,
            day: req.day,
            time: non_blank(req.time, "time")?,
            faculty: req.faculty,
            room: req.room,
        })
    }
}
