use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{NewReminder, ReminderKind, ReminderPatch};
use crate::error::{non_blank, required, required_text, AppError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub user_id: Option<Uuid>,
    pub message: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    pub date_time: Option<OffsetDateTime>,
    #[serde(rename = "type")]
    pub kind: Option<ReminderKind>,
}

impl TryFrom<CreateReminderRequest> for NewReminder {
    type Error = AppError;

    fn try_from(req: CreateReminderRequest) -> Result<Self, AppError> {
        Ok(Self {
            user_id: required(req.user_id, "userId")?,
            message: required_text(req.message, "message")?,
            date_time: required(req.date_time, "dateTime")?,
            kind: req.kind.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderRequest {
    pub message: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::datetime::deserialize_option")]
    pub date_time: Option<OffsetDateTime>,
    #[serde(rename = "type")]
    pub kind: Option<ReminderKind>,
}

impl TryFrom<UpdateReminderRequest> for ReminderPatch {
    type Error = AppError;

    fn try_from(req: UpdateReminderRequest) -> Result<Self, AppError> {
        Ok(Self {
            message: non_blank(req.message, "message")?,
            date_time: req.date_time,
            kind: req.kind,
        })
    }
}
