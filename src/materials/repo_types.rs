use std::cmp::Ordering;

use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Record;

/// Metadata of an uploaded file; the bytes live in object storage under `object_key`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub file_name: String,
    pub content_type: String,
    pub object_key: String,
    pub size_bytes: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewMaterial {
    pub user_id: Uuid,
    pub title: String,
    pub file_name: String,
    pub content_type: String,
    pub object_key: String,
    pub size_bytes: i64,
}

#[derive(Debug, Default)]
pub struct MaterialPatch {
    pub title: Option<String>,
}

impl Record for Material {
    type New = NewMaterial;
    type Patch = MaterialPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn from_new(id: Uuid, created_at: OffsetDateTime, new: NewMaterial) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            file_name: new.file_name,
            content_type: new.content_type,
            object_key: new.object_key,
            size_bytes: new.size_bytes,
            created_at,
        }
    }

    fn apply(&mut self, patch: MaterialPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
    }

    // newest upload first
    fn natural_order(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }
}
