use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{Assignment, AssignmentPatch, NewAssignment};
use crate::db::PgStore;
use crate::store::{Repository, StoreError};

#[async_trait]
impl Repository<Assignment> for PgStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Assignment>, StoreError> {
        let rows = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT id, user_id, title, subject, description, due_date, completed, created_at
            FROM assignments
            WHERE user_id = $1
            ORDER BY due_date ASC, created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn create(&self, new: NewAssignment) -> Result<Assignment, StoreError> {
        let row = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (user_id, title, subject, description, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, subject, description, due_date, completed, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.title)
        .bind(new.subject)
        .bind(new.description)
        .bind(new.due_date)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn update_partial(
        &self,
        id: Uuid,
        patch: AssignmentPatch,
    ) -> Result<Option<Assignment>, StoreError> {
        let row = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments
               SET title       = COALESCE($2, title),
                   subject     = COALESCE($3, subject),
                   description = COALESCE($4, description),
                   due_date    = COALESCE($5, due_date),
                   completed   = COALESCE($6, completed)
             WHERE id = $1
            RETURNING id, user_id, title, subject, description, due_date, completed, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.subject)
        .bind(patch.description)
        .bind(patch.due_date)
        .bind(patch.completed)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Assignment>, StoreError> {
        let row = sqlx::query_as::<_, Assignment>(
            r#"
            DELETE FROM assignments
            WHERE id = $1
            RETURNING id, user_id, title, subject, description, due_date, completed, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
