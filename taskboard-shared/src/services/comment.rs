/// Comment service

use crate::error::{ServiceError, ServiceResult};
use crate::models::comment::{Comment, CommentDetails, CreateComment};
use crate::models::task::Task;
use sqlx::PgPool;
use tracing::info;

/// Transport-facing input for adding a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub task_id: i64,
    pub user_id: i64,
    pub content: String,
}

/// Comment business operations
#[derive(Clone)]
pub struct CommentService {
    db: PgPool,
}

impl CommentService {
    /// Creates a new comment service backed by the given pool
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Adds a comment to a task
    ///
    /// The task must exist; the author reference is left to the foreign
    /// key.
    pub async fn add_comment(&self, input: NewComment) -> ServiceResult<Comment> {
        info!(task_id = input.task_id, "Adding comment");

        let mut tx = self.db.begin().await?;

        Task::find_by_id(&mut *tx, input.task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", input.task_id))?;

        let comment = Comment::create(
            &mut *tx,
            CreateComment {
                task_id: input.task_id,
                user_id: input.user_id,
                content: input.content,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(comment)
    }

    /// Lists a task's comments, newest first
    pub async fn list_task_comments(&self, task_id: i64) -> ServiceResult<Vec<CommentDetails>> {
        Ok(Comment::find_by_task_id(&self.db, task_id).await?)
    }

    /// Replaces a comment's body
    pub async fn update_comment(&self, id: i64, content: &str) -> ServiceResult<Comment> {
        info!(id, "Updating comment");

        let mut tx = self.db.begin().await?;

        Comment::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment", id))?;

        let comment = Comment::update(&mut *tx, id, content)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment", id))?;

        tx.commit().await?;

        Ok(comment)
    }

    /// Deletes a comment
    pub async fn delete_comment(&self, id: i64) -> ServiceResult<()> {
        info!(id, "Deleting comment");

        let mut tx = self.db.begin().await?;

        Comment::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment", id))?;

        Comment::delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(())
    }
}
