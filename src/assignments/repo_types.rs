use std::cmp::Ordering;

use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Record;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewAssignment {
    pub user_id: Uuid,
    pub title: String,
    pub subject: Option<String>,
    pub due_date: OffsetDateTime,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<OffsetDateTime>,
    pub completed: Option<bool>,
}

impl Record for Assignment {
    type New = NewAssignment;
    type Patch = AssignmentPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn from_new(id: Uuid, created_at: OffsetDateTime, new: NewAssignment) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            subject: new.subject,
            description: new.description,
            due_date: new.due_date,
            completed: false,
            created_at,
        }
    }

    fn apply(&mut self, patch: AssignmentPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.subject {
            self.subject = Some(v);
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.due_date {
            self.due_date = v;
        }
        if let Some(v) = patch.completed {
            self.completed = v;
        }
    }

    fn natural_order(&self, other: &Self) -> Ordering {
        self.due_date.cmp(&other.due_date)
    }
}
