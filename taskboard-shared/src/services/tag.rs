/// Tag service

use crate::error::{ServiceError, ServiceResult};
use crate::models::tag::{CreateTag, Tag, TaskTag};
use crate::models::task::Task;
use sqlx::PgPool;
use tracing::info;

/// Transport-facing input for creating a tag
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: String,
}

/// Tag business operations
#[derive(Clone)]
pub struct TagService {
    db: PgPool,
}

impl TagService {
    /// Creates a new tag service backed by the given pool
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a tag
    ///
    /// A taken name surfaces as a store constraint error.
    pub async fn create_tag(&self, input: NewTag) -> ServiceResult<Tag> {
        info!(name = %input.name, "Creating tag");

        Ok(Tag::create(
            &self.db,
            CreateTag {
                name: input.name,
                color: input.color,
            },
        )
        .await?)
    }

    /// Lists all tags ordered by name
    pub async fn list_tags(&self) -> ServiceResult<Vec<Tag>> {
        Ok(Tag::list_all(&self.db).await?)
    }

    /// Lists a task's tags ordered by name
    pub async fn list_task_tags(&self, task_id: i64) -> ServiceResult<Vec<Tag>> {
        Ok(Tag::find_by_task_id(&self.db, task_id).await?)
    }

    /// Attaches a tag to a task
    ///
    /// Both sides must exist. Attaching the same pair twice is a store
    /// constraint error.
    pub async fn tag_task(&self, task_id: i64, tag_id: i64) -> ServiceResult<TaskTag> {
        info!(task_id, tag_id, "Tagging task");

        let mut tx = self.db.begin().await?;

        Task::find_by_id(&mut *tx, task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", task_id))?;

        Tag::find_by_id(&mut *tx, tag_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("tag", tag_id))?;

        let association = TaskTag::attach(&mut *tx, task_id, tag_id).await?;

        tx.commit().await?;

        Ok(association)
    }

    /// Detaches a tag from a task
    ///
    /// An absent association fails with `NotFound`.
    pub async fn untag_task(&self, task_id: i64, tag_id: i64) -> ServiceResult<()> {
        info!(task_id, tag_id, "Untagging task");

        let removed = TaskTag::detach(&self.db, task_id, tag_id).await?;
        if !removed {
            return Err(ServiceError::not_found(
                "task tag",
                format!("task {} tag {}", task_id, tag_id),
            ));
        }

        Ok(())
    }

    /// Deletes a tag
    pub async fn delete_tag(&self, id: i64) -> ServiceResult<()> {
        info!(id, "Deleting tag");

        let mut tx = self.db.begin().await?;

        Tag::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("tag", id))?;

        Tag::delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(())
    }
}
