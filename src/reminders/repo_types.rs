use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "reminder_kind", rename_all = "lowercase")]
pub enum ReminderKind {
    Assignment,
    Project,
    Class,
    Exam,
    #[default]
    Other,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    /// Stored and returned; nothing flips it yet.
    pub sent: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewReminder {
    pub user_id: Uuid,
    pub message: String,
    pub date_time: OffsetDateTime,
    pub kind: ReminderKind,
}

#[derive(Debug, Default)]
pub struct ReminderPatch {
    pub message: Option<String>,
    pub date_time: Option<OffsetDateTime>,
    pub kind: Option<ReminderKind>,
}

impl Record for Reminder {
    type New = NewReminder;
    type Patch = ReminderPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn from_new(id: Uuid, created_at: OffsetDateTime, new: NewReminder) -> Self {
        Self {
            id,
            user_id: new.user_id,
            message: new.message,
            date_time: new.date_time,
            kind: new.kind,
            sent: false,
            created_at,
        }
    }

    fn apply(&mut self, patch: ReminderPatch) {
        if let Some(v) = patch.message {
            self.message = v;
        }
        if let Some(v) = patch.date_time {
            self.date_time = v;
        }
        if let Some(v) = patch.kind {
            self.kind = v;
        }
    }

    fn natural_order(&self, other: &Self) -> Ordering {
        self.date_time.cmp(&other.date_time)
    }
}
