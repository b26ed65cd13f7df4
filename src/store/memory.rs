use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Record, Repository, StoreError};
use crate::auth::repo::UserRepo;
use crate::auth::repo_types::User;

/// In-process backend used when no database is configured, and by tests.
///
/// Each operation holds the map lock for its whole duration, so a patch is
/// applied to a record in one step.
pub struct MemoryRepo<R> {
    records: RwLock<HashMap<Uuid, R>>,
}

impl<R> Default for MemoryRepo<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepo<R> {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<R>, StoreError> {
        let records = self.records.read().await;
        let mut out: Vec<R> = records
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.natural_order(b)
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });
        Ok(out)
    }

    async fn create(&self, new: R::New) -> Result<R, StoreError> {
        let record = R::from_new(Uuid::new_v4(), OffsetDateTime::now_utc(), new);
        self.records
            .write()
            .await
            .insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update_partial(&self, id: Uuid, patch: R::Patch) -> Result<Option<R>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|record| {
            record.apply(patch);
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        Ok(self.records.write().await.remove(&id))
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepo for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::Duplicate);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
