/// Tag model, the task/tag association, and their database operations
///
/// Tags are global labels with a display color. The `task_tags` table
/// associates them with tasks; its identity is the (task_id, tag_id)
/// pair, so attaching the same tag twice is a store constraint error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Tag record as persisted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID, assigned by the store on insert
    pub id: i64,

    /// Tag name, unique across all tags
    pub name: String,

    /// Display color as a hex string (e.g. "#dc3545")
    pub color: String,

    pub created_at: DateTime<Utc>,
}

/// Task/tag association row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskTag {
    pub task_id: i64,
    pub tag_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new tag
#[derive(Debug, Clone)]
pub struct CreateTag {
    pub name: String,
    pub color: String,
}

impl Tag {
    /// Creates a new tag
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken (unique constraint
    /// violation) or the database operation fails.
    pub async fn create(db: impl PgExecutor<'_>, data: CreateTag) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.color)
        .fetch_one(db)
        .await?;

        Ok(tag)
    }

    /// Finds a tag by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, color, created_at
            FROM tags
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(tag)
    }

    /// Lists all tags ordered by name
    pub async fn list_all(db: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, color, created_at
            FROM tags
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(tags)
    }

    /// Lists a task's tags via the association table, ordered by name
    pub async fn find_by_task_id(
        db: impl PgExecutor<'_>,
        task_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.color, t.created_at
            FROM tags t
            JOIN task_tags tt ON t.id = tt.tag_id
            WHERE tt.task_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(task_id)
        .fetch_all(db)
        .await?;

        Ok(tags)
    }

    /// Deletes a tag
    ///
    /// Associations referencing the tag go with it via CASCADE.
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl TaskTag {
    /// Attaches a tag to a task
    ///
    /// # Errors
    ///
    /// Returns an error if the pair already exists (composite primary
    /// key) or either side violates a foreign key.
    pub async fn attach(
        db: impl PgExecutor<'_>,
        task_id: i64,
        tag_id: i64,
    ) -> Result<Self, sqlx::Error> {
        let association = sqlx::query_as::<_, TaskTag>(
            r#"
            INSERT INTO task_tags (task_id, tag_id)
            VALUES ($1, $2)
            RETURNING task_id, tag_id, created_at
            "#,
        )
        .bind(task_id)
        .bind(tag_id)
        .fetch_one(db)
        .await?;

        Ok(association)
    }

    /// Detaches a tag from a task
    ///
    /// Returns whether an association row was deleted.
    pub async fn detach(
        db: impl PgExecutor<'_>,
        task_id: i64,
        tag_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_tags WHERE task_id = $1 AND tag_id = $2")
            .bind(task_id)
            .bind(tag_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
