/// Task service
///
/// Orchestrates task persistence: verifies the owning project exists
/// before creation, parses symbolic status/priority values, and wraps
/// every mutation in a transaction.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::services::task::{NewTask, TaskService};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let tasks = TaskService::new(pool);
///
/// let task = tasks.create_task(NewTask {
///     project_id: 1,
///     title: "Fix the login redirect".to_string(),
///     description: None,
///     status: "TODO".to_string(),
///     priority: "HIGH".to_string(),
///     assignee_id: None,
///     due_date: None,
/// }).await?;
/// assert!(task.id > 0);
/// # Ok(())
/// # }
/// ```

use crate::error::{ServiceError, ServiceResult};
use crate::models::project::Project;
use crate::models::task::{
    CreateTask, Priority, Task, TaskDetails, TaskSearchFilter, TaskStatus, UpdateTask,
};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;

/// Transport-facing input for creating a task
///
/// Status and priority arrive as symbolic names and are parsed before
/// anything touches the store.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Transport-facing input for updating a task
///
/// The owning project cannot be changed after creation.
#[derive(Debug, Clone)]
pub struct EditTask {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Optional filters for task search
///
/// Present fields narrow the result set; absent fields are
/// unconstrained.
#[derive(Debug, Clone, Default)]
pub struct TaskSearchCriteria {
    pub project_id: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub keyword: Option<String>,
}

fn parse_status(value: &str) -> ServiceResult<TaskStatus> {
    TaskStatus::parse(value)
        .ok_or_else(|| ServiceError::invalid("status", format!("unrecognized value: {}", value)))
}

fn parse_priority(value: &str) -> ServiceResult<Priority> {
    Priority::parse(value)
        .ok_or_else(|| ServiceError::invalid("priority", format!("unrecognized value: {}", value)))
}

/// Task business operations
#[derive(Clone)]
pub struct TaskService {
    db: PgPool,
}

impl TaskService {
    /// Creates a new task service backed by the given pool
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a task
    ///
    /// The referenced project must exist; a dangling project id fails
    /// with `NotFound` and nothing is inserted.
    pub async fn create_task(&self, input: NewTask) -> ServiceResult<Task> {
        info!(title = %input.title, project_id = input.project_id, "Creating task");

        let status = parse_status(&input.status)?;
        let priority = parse_priority(&input.priority)?;

        let mut tx = self.db.begin().await?;

        Project::find_by_id(&mut *tx, input.project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", input.project_id))?;

        let task = Task::create(
            &mut *tx,
            CreateTask {
                project_id: input.project_id,
                title: input.title,
                description: input.description,
                status,
                priority,
                assignee_id: input.assignee_id,
                due_date: input.due_date,
            },
        )
        .await?;

        tx.commit().await?;

        info!(id = task.id, "Created task");
        Ok(task)
    }

    /// Fetches a task with project and assignee names joined in
    pub async fn get_task(&self, id: i64) -> ServiceResult<TaskDetails> {
        Task::find_by_id_with_details(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", id))
    }

    /// Lists a project's tasks in board order
    pub async fn list_project_tasks(&self, project_id: i64) -> ServiceResult<Vec<TaskDetails>> {
        Ok(Task::find_by_project_id(&self.db, project_id).await?)
    }

    /// Searches tasks by any combination of criteria
    ///
    /// Symbolic status/priority filters are parsed first; an
    /// unrecognized value fails validation rather than matching nothing.
    pub async fn search_tasks(&self, criteria: TaskSearchCriteria) -> ServiceResult<Vec<TaskDetails>> {
        let filter = TaskSearchFilter {
            project_id: criteria.project_id,
            status: criteria.status.as_deref().map(parse_status).transpose()?,
            priority: criteria.priority.as_deref().map(parse_priority).transpose()?,
            keyword: criteria.keyword,
        };

        Ok(Task::search(&self.db, &filter).await?)
    }

    /// Lists a user's overdue tasks
    pub async fn overdue_tasks(&self, user_id: i64) -> ServiceResult<Vec<TaskDetails>> {
        Ok(Task::find_overdue(&self.db, user_id).await?)
    }

    /// Overwrites a task's mutable fields
    pub async fn update_task(&self, id: i64, input: EditTask) -> ServiceResult<Task> {
        info!(id, "Updating task");

        let status = parse_status(&input.status)?;
        let priority = parse_priority(&input.priority)?;

        let mut tx = self.db.begin().await?;

        Task::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", id))?;

        let task = Task::update(
            &mut *tx,
            id,
            UpdateTask {
                title: input.title,
                description: input.description,
                status,
                priority,
                assignee_id: input.assignee_id,
                due_date: input.due_date,
            },
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("task", id))?;

        tx.commit().await?;

        Ok(task)
    }

    /// Updates only a task's status
    ///
    /// The symbolic value is validated before the update statement is
    /// issued.
    pub async fn update_task_status(&self, id: i64, status: &str) -> ServiceResult<Task> {
        info!(id, status, "Updating task status");

        let status = parse_status(status)?;

        let mut tx = self.db.begin().await?;

        Task::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", id))?;

        let task = Task::update_status(&mut *tx, id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", id))?;

        tx.commit().await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Deleting an already-absent id fails with `NotFound` rather than
    /// silently succeeding.
    pub async fn delete_task(&self, id: i64) -> ServiceResult<()> {
        info!(id, "Deleting task");

        let mut tx = self.db.begin().await?;

        Task::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("task", id))?;

        Task::delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(())
    }
}
