//! Storage-agnostic access to the user-owned records.
//!
//! Every record kind gets the same four operations through [`Repository`].
//! Handlers only ever see `Arc<dyn Repository<R>>`, so the Postgres backend
//! and the in-process memory backend are interchangeable.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::assignments::repo_types::Assignment;
use crate::auth::repo::UserRepo;
use crate::db::PgStore;
use crate::materials::repo_types::Material;
use crate::projects::repo_types::Project;
use crate::reminders::repo_types::Reminder;
use crate::timetable::repo_types::TimetableEntry;

pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint rejected the write.
    #[error("duplicate key")]
    Duplicate,
}

impl StoreError {
    /// Like `From<sqlx::Error>`, but unique violations (SQLSTATE 23505) become [`StoreError::Duplicate`].
    pub fn on_insert(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            other => StoreError::Database(other),
        }
    }
}

/// A record owned by a user and addressable by its own id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Fields supplied on creation.
    type New: Send + 'static;
    /// Subset of fields to overwrite; `None` means "leave as is".
    type Patch: Send + 'static;

    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
    fn created_at(&self) -> OffsetDateTime;

    /// Builds the stored record from the server-assigned id and timestamp.
    fn from_new(id: Uuid, created_at: OffsetDateTime, new: Self::New) -> Self;

    fn apply(&mut self, patch: Self::Patch);

    /// Listing order for `list_by_owner`, before the `created_at` tie-break.
    fn natural_order(&self, other: &Self) -> Ordering;
}

#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<R>, StoreError>;
    async fn create(&self, new: R::New) -> Result<R, StoreError>;
    /// `Ok(None)` when no record has this id.
    async fn update_partial(&self, id: Uuid, patch: R::Patch) -> Result<Option<R>, StoreError>;
    /// Returns the removed record, `Ok(None)` when no record has this id.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError>;
}

/// All repositories the handlers need, built once at startup.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepo>,
    pub timetable: Arc<dyn Repository<TimetableEntry>>,
    pub assignments: Arc<dyn Repository<Assignment>>,
    pub projects: Arc<dyn Repository<Project>>,
    pub reminders: Arc<dyn Repository<Reminder>>,
    pub materials: Arc<dyn Repository<Material>>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        let pg = Arc::new(PgStore::new(pool));
        Self {
            users: pg.clone(),
            timetable: pg.clone(),
            assignments: pg.clone(),
            projects: pg.clone(),
            reminders: pg.clone(),
            materials: pg,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::MemoryUsers::default()),
            timetable: Arc::new(memory::MemoryRepo::<TimetableEntry>::default()),
            assignments: Arc::new(memory::MemoryRepo::<Assignment>::default()),
            projects: Arc::new(memory::MemoryRepo::<Project>::default()),
            reminders: Arc::new(memory::MemoryRepo::<Reminder>::default()),
            materials: Arc::new(memory::MemoryRepo::<Material>::default()),
        }
    }
}
