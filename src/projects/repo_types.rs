use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        serialize_with = "time::serde::rfc3339::option::serialize",
        deserialize_with = "crate::dto::datetime::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Percent complete, 0..=100.
    pub progress: i32,
    pub milestones: Vec<Milestone>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Milestones live in a JSONB column.
#[derive(Debug, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub deadline: OffsetDateTime,
    pub progress: i32,
    pub milestones: Json<Vec<Milestone>>,
    pub created_at: OffsetDateTime,
}

impl From<ProjectRow> for Project {
    fn from(r: ProjectRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            description: r.description,
            deadline: r.deadline,
            progress: r.progress,
            milestones: r.milestones.0,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug)]
pub struct NewProject {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub deadline: OffsetDateTime,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<OffsetDateTime>,
    pub progress: Option<i32>,
    /// Replaces the whole list.
    pub milestones: Option<Vec<Milestone>>,
}

impl Record for Project {
    type New = NewProject;
    type Patch = ProjectPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn from_new(id: Uuid, created_at: OffsetDateTime, new: NewProject) -> Self {
        Self {
            id,
            user_id: new.user_id,
            name: new.name,
            description: new.description,
            deadline: new.deadline,
            progress: 0,
            milestones: new.milestones,
            created_at,
        }
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.deadline {
            self.deadline = v;
        }
        if let Some(v) = patch.progress {
            self.progress = v;
        }
        if let Some(v) = patch.milestones {
            self.milestones = v;
        }
    }

    fn natural_order(&self, other: &Self) -> Ordering {
        self.deadline.cmp(&other.deadline)
    }
}
