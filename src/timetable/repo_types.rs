use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Record;

/// Teaching days, in week order. The Postgres enum is declared in the same
/// order, so `ORDER BY day` and `Ord` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "weekday")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub day: Weekday,
    pub time: String,
    pub faculty: Option<String>,
    pub room: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewTimetableEntry {
    pub user_id: Uuid,
    pub subject: String,
    pub day: Weekday,
    pub time: String,
    pub faculty: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Default)]
pub struct TimetablePatch {
    pub subject: Option<String>,
    pub day: Option<Weekday>,
    pub time: Option<String>,
    pub faculty: Option<String>,
    pub room: Option<String>,
}

impl Record for TimetableEntry {
    type New = NewTimetableEntry;
    type Patch = TimetablePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn from_new(id: Uuid, created_at: OffsetDateTime, new: NewTimetableEntry) -> Self {
        Self {
            id,
            user_id: new.user_id,
            subject: new.subject,
            day: new.day,
            time: new.time,
            faculty: new.faculty,
            room: new.room,
            created_at,
        }
    }

    fn apply(&mut self, patch: TimetablePatch) {
        if let Some(v) = patch.subject {
            self.subject = v;
        }
        if let Some(v) = patch.day {
            self.day = v;
        }
        if let Some(v) = patch.time {
            self.time = v;
        }
        if let Some(v) = patch.faculty {
            self.faculty = Some(v);
        }
        if let Some(v) = patch.room {
            self.room = Some(v);
        }
    }

    fn natural_order(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then_with(|| self.time.cmp(&other.time))
    }
}
