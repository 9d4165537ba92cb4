/// Task model and database operations
///
/// Tasks belong to a project, may be assigned to a user, and carry a
/// status and a priority stored as PostgreSQL enum types.
///
/// # Listing order
///
/// Every task listing surfaces active work first: rows are ordered by a
/// fixed status rank (TODO=1, IN_PROGRESS=2, DONE=3) and by creation time
/// descending within each status group. This is a deliberate UX choice,
/// not an artifact of the enum's declaration order.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('TODO', 'IN_PROGRESS', 'DONE');
/// CREATE TYPE task_priority AS ENUM ('LOW', 'MEDIUM', 'HIGH');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'TODO',
///     priority task_priority NOT NULL DEFAULT 'MEDIUM',
///     assignee_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
///     due_date DATE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Priority, Task, TaskStatus};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     project_id: 1,
///     title: "Write the release notes".to_string(),
///     description: None,
///     status: TaskStatus::Todo,
///     priority: Priority::High,
///     assignee_id: None,
///     due_date: None,
/// }).await?;
///
/// let listed = Task::find_by_project_id(&pool, task.project_id).await?;
/// assert!(!listed.is_empty());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Task workflow status
///
/// Stored under its symbolic name. Any status may move to any other
/// status; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started yet
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Symbolic name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Parses a symbolic name, returning `None` for unrecognized values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "DONE" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Fixed ordering value used to sort task listings
    pub fn sort_rank(&self) -> i16 {
        match self {
            TaskStatus::Todo => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Done => 3,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Symbolic name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Parses a symbolic name, returning `None` for unrecognized values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LOW" => Some(Priority::Low),
            "MEDIUM" => Some(Priority::Medium),
            "HIGH" => Some(Priority::High),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Badge color used when rendering the priority
    pub fn color(&self) -> &'static str {
        match self {
            Priority::Low => "#6c757d",
            Priority::Medium => "#ffc107",
            Priority::High => "#dc3545",
        }
    }
}

/// Task record as persisted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by the store on insert
    pub id: i64,

    /// Project this task belongs to
    pub project_id: i64,

    /// Short title
    pub title: String,

    /// Free-form description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: Priority,

    /// Assigned user (null when unassigned)
    pub assignee_id: Option<i64>,

    /// Due date (null when open-ended)
    pub due_date: Option<NaiveDate>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task read projection with join-only columns
///
/// Produced by the detail and listing queries. `project_name` and
/// `assignee_name` come from left joins and are null when the referenced
/// row is absent; they are never written back.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskDetails {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Name of the owning project
    pub project_name: Option<String>,

    /// Username of the assignee
    pub assignee_name: Option<String>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Input for overwriting a task's mutable fields
///
/// The owning project is fixed at creation and cannot be changed.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Combined task filter
///
/// Each present field narrows the result set; absent fields are
/// unconstrained. The keyword matches title or description,
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TaskSearchFilter {
    pub project_id: Option<i64>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub keyword: Option<String>,
}

/// Builds the search statement for the filters that are present
///
/// Placeholders are numbered in field order; the keyword placeholder is
/// reused for both title and description. Callers must bind values in
/// the same order.
fn search_sql(filter: &TaskSearchFilter) -> String {
    let mut sql = String::from(
        "SELECT t.id, t.project_id, t.title, t.description, t.status, t.priority, \
                t.assignee_id, t.due_date, t.created_at, t.updated_at, \
                p.name AS project_name, u.username AS assignee_name \
         FROM tasks t \
         LEFT JOIN projects p ON t.project_id = p.id \
         LEFT JOIN users u ON t.assignee_id = u.id \
         WHERE 1 = 1",
    );
    let mut bind = 0;

    if filter.project_id.is_some() {
        bind += 1;
        sql.push_str(&format!(" AND t.project_id = ${}", bind));
    }
    if filter.status.is_some() {
        bind += 1;
        sql.push_str(&format!(" AND t.status = ${}", bind));
    }
    if filter.priority.is_some() {
        bind += 1;
        sql.push_str(&format!(" AND t.priority = ${}", bind));
    }
    if filter.keyword.is_some() {
        bind += 1;
        sql.push_str(&format!(
            " AND (t.title ILIKE ${0} OR t.description ILIKE ${0})",
            bind
        ));
    }

    sql.push_str(
        " ORDER BY CASE t.status \
              WHEN 'TODO' THEN 1 \
              WHEN 'IN_PROGRESS' THEN 2 \
              WHEN 'DONE' THEN 3 \
          END, t.created_at DESC",
    );

    sql
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced project or assignee violates a
    /// foreign key, or the database operation fails. Callers wanting a
    /// not-found failure instead of a constraint error check the project
    /// first (see the task service).
    pub async fn create(db: impl PgExecutor<'_>, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, priority, assignee_id, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, project_id, title, description, status, priority,
                      assignee_id, due_date, created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_one(db)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, description, status, priority,
                   assignee_id, due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID with project and assignee names joined in
    ///
    /// Absent foreign rows yield null derived fields, not a failure.
    pub async fn find_by_id_with_details(
        db: impl PgExecutor<'_>,
        id: i64,
    ) -> Result<Option<TaskDetails>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskDetails>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.priority,
                   t.assignee_id, t.due_date, t.created_at, t.updated_at,
                   p.name AS project_name,
                   u.username AS assignee_name
            FROM tasks t
            LEFT JOIN projects p ON t.project_id = p.id
            LEFT JOIN users u ON t.assignee_id = u.id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Lists a project's tasks in board order
    ///
    /// TODO rows first, then IN_PROGRESS, then DONE, newest first within
    /// each group.
    pub async fn find_by_project_id(
        db: impl PgExecutor<'_>,
        project_id: i64,
    ) -> Result<Vec<TaskDetails>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskDetails>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.priority,
                   t.assignee_id, t.due_date, t.created_at, t.updated_at,
                   p.name AS project_name,
                   u.username AS assignee_name
            FROM tasks t
            LEFT JOIN projects p ON t.project_id = p.id
            LEFT JOIN users u ON t.assignee_id = u.id
            WHERE t.project_id = $1
            ORDER BY CASE t.status
                WHEN 'TODO' THEN 1
                WHEN 'IN_PROGRESS' THEN 2
                WHEN 'DONE' THEN 3
            END, t.created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(db)
        .await?;

        Ok(tasks)
    }

    /// Searches tasks by any combination of filters
    ///
    /// Present filters are AND-combined; the result uses the same board
    /// order as [`Task::find_by_project_id`].
    pub async fn search(
        db: impl PgExecutor<'_>,
        filter: &TaskSearchFilter,
    ) -> Result<Vec<TaskDetails>, sqlx::Error> {
        let sql = search_sql(filter);
        let mut query = sqlx::query_as::<_, TaskDetails>(&sql);

        if let Some(project_id) = filter.project_id {
            query = query.bind(project_id);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(priority) = filter.priority {
            query = query.bind(priority);
        }
        if let Some(keyword) = &filter.keyword {
            query = query.bind(format!("%{}%", keyword));
        }

        query.fetch_all(db).await
    }

    /// Lists a user's assigned tasks whose due date has passed
    ///
    /// DONE tasks are excluded. Most overdue first.
    pub async fn find_overdue(
        db: impl PgExecutor<'_>,
        user_id: i64,
    ) -> Result<Vec<TaskDetails>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskDetails>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.priority,
                   t.assignee_id, t.due_date, t.created_at, t.updated_at,
                   p.name AS project_name,
                   u.username AS assignee_name
            FROM tasks t
            LEFT JOIN projects p ON t.project_id = p.id
            LEFT JOIN users u ON t.assignee_id = u.id
            WHERE t.assignee_id = $1
              AND t.due_date < CURRENT_DATE
              AND t.status <> 'DONE'
            ORDER BY t.due_date ASC, t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(tasks)
    }

    /// Overwrites a task's mutable fields and refreshes updated_at
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                priority = $5,
                assignee_id = $6,
                due_date = $7,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, project_id, title, description, status, priority,
                      assignee_id, due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Updates only the status column and updated_at
    ///
    /// Used for small, frequent state changes without re-sending the
    /// whole record.
    pub async fn update_status(
        db: impl PgExecutor<'_>,
        id: i64,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, project_id, title, description, status, priority,
                      assignee_id, due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(db)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns whether a row was deleted.
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "TODO");
        assert_eq!(TaskStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(TaskStatus::Done.as_str(), "DONE");
    }

    #[test]
    fn test_task_status_parse_roundtrip() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_task_status_parse_rejects_unknown() {
        assert_eq!(TaskStatus::parse("STARTED"), None);
        assert_eq!(TaskStatus::parse("todo"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn test_task_status_sort_rank() {
        assert_eq!(TaskStatus::Todo.sort_rank(), 1);
        assert_eq!(TaskStatus::InProgress.sort_rank(), 2);
        assert_eq!(TaskStatus::Done.sort_rank(), 3);
    }

    #[test]
    fn test_priority_parse_roundtrip() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Priority::parse("URGENT"), None);
    }

    #[test]
    fn test_priority_color() {
        assert_eq!(Priority::Low.color(), "#6c757d");
        assert_eq!(Priority::Medium.color(), "#ffc107");
        assert_eq!(Priority::High.color(), "#dc3545");
    }

    #[test]
    fn test_search_sql_without_filters() {
        let sql = search_sql(&TaskSearchFilter::default());

        assert!(!sql.contains(" AND "));
        assert!(sql.contains("WHEN 'TODO' THEN 1"));
        assert!(sql.contains("t.created_at DESC"));
    }

    #[test]
    fn test_search_sql_numbers_placeholders_in_field_order() {
        let filter = TaskSearchFilter {
            project_id: Some(1),
            status: Some(TaskStatus::Todo),
            priority: Some(Priority::High),
            keyword: Some("login".to_string()),
        };
        let sql = search_sql(&filter);

        assert!(sql.contains("t.project_id = $1"));
        assert!(sql.contains("t.status = $2"));
        assert!(sql.contains("t.priority = $3"));
        assert!(sql.contains("t.title ILIKE $4 OR t.description ILIKE $4"));
    }

    #[test]
    fn test_search_sql_keyword_only_uses_first_placeholder() {
        let filter = TaskSearchFilter {
            keyword: Some("login".to_string()),
            ..Default::default()
        };
        let sql = search_sql(&filter);

        assert!(sql.contains("t.title ILIKE $1 OR t.description ILIKE $1"));
        assert!(!sql.contains("$2"));
    }
}
