/// Comment model and database operations
///
/// Comments hang off a task and record which user wrote them. Listings
/// are newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Comment record as persisted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID, assigned by the store on insert
    pub id: i64,

    /// Task this comment belongs to
    pub task_id: i64,

    /// Author
    pub user_id: i64,

    /// Comment body
    pub content: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment read projection with the author's names joined in
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentDetails {
    pub id: i64,
    pub task_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Author's login name
    pub author_username: Option<String>,

    /// Author's display name
    pub author_name: Option<String>,
}

/// Input for creating a new comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub task_id: i64,
    pub user_id: i64,
    pub content: String,
}

impl Comment {
    /// Creates a new comment
    pub async fn create(db: impl PgExecutor<'_>, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (task_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.user_id)
        .bind(data.content)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    /// Finds a comment by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, task_id, user_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments, newest first, with author names joined in
    pub async fn find_by_task_id(
        db: impl PgExecutor<'_>,
        task_id: i64,
    ) -> Result<Vec<CommentDetails>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CommentDetails>(
            r#"
            SELECT c.id, c.task_id, c.user_id, c.content, c.created_at, c.updated_at,
                   u.username AS author_username,
                   u.name AS author_name
            FROM comments c
            LEFT JOIN users u ON c.user_id = u.id
            WHERE c.task_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(task_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    /// Replaces a comment's body, refreshing updated_at
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: i64,
        content: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, task_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(db)
        .await?;

        Ok(comment)
    }

    /// Deletes a comment
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
