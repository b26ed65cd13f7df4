use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{NewTimetableEntry, TimetableEntry, TimetablePatch};
use crate::db::PgStore;
use crate::store::{Repository, StoreError};

#[async_trait]
impl Repository<TimetableEntry> for PgStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<TimetableEntry>, StoreError> {
        let rows = sqlx::query_as::<_, TimetableEntry>(
            r#"
            SELECT id, user_id, subject, day, time, faculty, room, created_at
            FROM timetable_entries
            WHERE user_id = $1
            ORDER BY day ASC, time ASC, created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn create(&self, new: NewTimetableEntry) -> Result<TimetableEntry, StoreError> {
        let row = sqlx::query_as::<_, TimetableEntry>(
            r#"
            INSERT INTO timetable_entries (user_id, subject, day, time, faculty, room)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, subject, day, time, faculty, room, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.subject)
        .bind(new.day)
        .bind(new.time)
        .bind(new.faculty)
        .bind(new.room)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    async fn update_partial(
        &self,
        id: Uuid,
        patch: TimetablePatch,
    ) -> Result<Option<TimetableEntry>, StoreError> {
        let row = sqlx::query_as::<_, TimetableEntry>(
            r#"
            UPDATE timetable_entries
               SET subject = COALESCE($2, subject),
                   day     = COALESCE($3, day),
                   time    = COALESCE($4, time),
                   faculty = COALESCE($5, faculty),
                   room    = COALESCE($6, room)
             WHERE id = $1
            RETURNING id, user_id, subject, day, time, faculty, room, created_at
            "#,
        )
        .bind(id)
        .bind(patch.subject)
        .bind(patch.day)
        .bind(patch.time)
        .bind(patch.faculty)
        .bind(patch.room)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<TimetableEntry>, StoreError> {
        let row = sqlx::query_as::<_, TimetableEntry>(
            r#"
            DELETE FROM timetable_entries
            WHERE id = $1
            RETURNING id, user_id, subject, day, time, faculty, room, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
