use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{NewReminder, Reminder, ReminderPatch};
use crate::db::PgStore;
use crate::store::{Repository, StoreError};

#[async_trait]
impl Repository<Reminder> for PgStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Reminder>, StoreError> {
        let rows = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT id, user_id, message, date_time, kind, sent, created_at
            FROM reminders
            WHERE user_id = $1
            ORDER BY date_time ASC, created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn create(&self, new: NewReminder) -> Result<Reminder, StoreError> {
        let row = sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (user_id, message, date_time, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, message, date_time, kind, sent, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.message)
        .bind(new.date_time)
        .bind(new.kind)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn update_partial(&self, id: Uuid, patch: ReminderPatch) -> Result<Option<Reminder>, StoreError> {
        let row = sqlx::query_as::<_, Reminder>(
            r#"
            UPDATE reminders
               SET message   = COALESCE($2, message),
                   date_time = COALESCE($3, date_time),
                   kind      = COALESCE($4, kind)
             WHERE id = $1
            RETURNING id, user_id, message, date_time, kind, sent, created_at
            "#,
        )
        .bind(id)
        .bind(patch.message)
        .bind(patch.date_time)
        .bind(patch.kind)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Reminder>, StoreError> {
        let row = sqlx::query_as::<_, Reminder>(
            r#"
            DELETE FROM reminders
            WHERE id = $1
            RETURNING id, user_id, message, date_time, kind, sent, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
