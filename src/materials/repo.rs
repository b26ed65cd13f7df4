use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{Material, MaterialPatch, NewMaterial};
use crate::db::PgStore;
use crate::store::{Repository, StoreError};

#[async_trait]
impl Repository<Material> for PgStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Material>, StoreError> {
        let rows = sqlx::query_as::<_, Material>(
            r#"
            SELECT id, user_id, title, file_name, content_type, object_key, size_bytes, created_at
            FROM materials
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn create(&self, new: NewMaterial) -> Result<Material, StoreError> {
        let row = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (user_id, title, file_name, content_type, object_key, size_bytes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, file_name, content_type, object_key, size_bytes, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.title)
        .bind(new.file_name)
        .bind(new.content_type)
        .bind(new.object_key)
        .bind(new.size_bytes)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn update_partial(&self, id: Uuid, patch: MaterialPatch) -> Result<Option<Material>, StoreError> {
        let row = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
               SET title = COALESCE($2, title)
             WHERE id = $1
            RETURNING id, user_id, title, file_name, content_type, object_key, size_bytes, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Material>, StoreError> {
        let row = sqlx::query_as::<_, Material>(
            r#"
            DELETE FROM materials
            WHERE id = $1
            RETURNING id, user_id, title, file_name, content_type, object_key, size_bytes, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
