use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::repo_types::{NewProject, Project, ProjectPatch, ProjectRow};
use crate::db::PgStore;
use crate::store::{Repository, StoreError};

#[async_trait]
impl Repository<Project> for PgStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, user_id, name, description, deadline, progress, milestones, created_at
            FROM projects
            WHERE user_id = $1
            ORDER BY deadline ASC, created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn create(&self, new: NewProject) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (user_id, name, description, deadline, milestones)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, description, deadline, progress, milestones, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.name)
        .bind(new.description)
        .bind(new.deadline)
        .bind(Json(new.milestones))
        .fetch_one(self.pool())
        .await?;
        Ok(row.into())
    }

    async fn update_partial(&self, id: Uuid, patch: ProjectPatch) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
               SET name        = COALESCE($2, name),
                   description = COALESCE($3, description),
                   deadline    = COALESCE($4, deadline),
                   progress    = COALESCE($5, progress),
                   milestones  = COALESCE($6, milestones)
             WHERE id = $1
            RETURNING id, user_id, name, description, deadline, progress, milestones, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.deadline)
        .bind(patch.progress)
        .bind(patch.milestones.map(Json))
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Project::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            DELETE FROM projects
            WHERE id = $1
            RETURNING id, user_id, name, description, deadline, progress, milestones, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Project::from))
    }
}
