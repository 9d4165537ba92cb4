/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /v1/tasks` - Search tasks by project/status/priority/keyword
/// - `GET    /v1/tasks/kanban?project_id=` - Tasks grouped by status
/// - `GET    /v1/tasks/overdue?user_id=` - A user's overdue tasks
/// - `GET    /v1/tasks/:id` - Task detail
/// - `POST   /v1/tasks` - Create task
/// - `PUT    /v1/tasks/:id` - Update task
/// - `POST   /v1/tasks/:id/status` - Update status only
/// - `DELETE /v1/tasks/:id` - Delete task
///
/// Search filters are AND-combined; an omitted or empty parameter is
/// unconstrained. Results always come back in board order: TODO first,
/// then IN_PROGRESS, then DONE, newest first within each group.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskboard_shared::models::project::ProjectDetails;
use taskboard_shared::models::task::{Task, TaskDetails, TaskStatus};
use taskboard_shared::services::task::{EditTask, NewTask, TaskSearchCriteria};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Owning project
    pub project_id: i64,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Symbolic status name, defaults to TODO
    #[serde(default = "default_status")]
    pub status: String,

    /// Symbolic priority name, defaults to MEDIUM
    #[serde(default = "default_priority")]
    pub priority: String,

    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Update task request
///
/// The owning project cannot be changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub status: String,
    pub priority: String,
    pub assignee_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Symbolic status name
    pub status: String,
}

/// Status update response
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub success: bool,
    pub message: String,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub project_id: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub keyword: Option<String>,
}

/// Kanban query parameters
#[derive(Debug, Deserialize)]
pub struct KanbanQuery {
    pub project_id: i64,
}

/// Kanban board response: the project and its tasks grouped by status
#[derive(Debug, Serialize)]
pub struct KanbanResponse {
    pub project: ProjectDetails,
    pub todo: Vec<TaskDetails>,
    pub in_progress: Vec<TaskDetails>,
    pub done: Vec<TaskDetails>,
}

/// Overdue query parameters
#[derive(Debug, Deserialize)]
pub struct OverdueQuery {
    pub user_id: i64,
}

/// Form-style parameters arrive empty rather than absent; treat both as
/// unconstrained.
fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Search tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<TaskDetails>>> {
    let tasks = state
        .tasks
        .search_tasks(TaskSearchCriteria {
            project_id: query.project_id,
            status: none_if_empty(query.status),
            priority: none_if_empty(query.priority),
            keyword: none_if_empty(query.keyword),
        })
        .await?;

    Ok(Json(tasks))
}

/// Kanban board: a project's tasks grouped by status
///
/// Groups preserve the listing order, so each column is newest first.
pub async fn kanban_board(
    State(state): State<AppState>,
    Query(query): Query<KanbanQuery>,
) -> ApiResult<Json<KanbanResponse>> {
    let project = state.projects.get_project(query.project_id).await?;
    let tasks = state.tasks.list_project_tasks(query.project_id).await?;

    let todo = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Todo)
        .cloned()
        .collect();
    let in_progress = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .cloned()
        .collect();
    let done = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .cloned()
        .collect();

    Ok(Json(KanbanResponse {
        project,
        todo,
        in_progress,
        done,
    }))
}

/// A user's overdue tasks
pub async fn overdue_tasks(
    State(state): State<AppState>,
    Query(query): Query<OverdueQuery>,
) -> ApiResult<Json<Vec<TaskDetails>>> {
    let tasks = state.tasks.overdue_tasks(query.user_id).await?;
    Ok(Json(tasks))
}

/// Task detail with project and assignee names
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskDetails>> {
    let task = state.tasks.get_task(id).await?;
    Ok(Json(task))
}

/// Create a task
///
/// # Errors
///
/// - `404 Not Found`: project_id does not resolve to a project
/// - `422 Unprocessable Entity`: field constraints or unknown
///   status/priority symbol
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from)?;

    let task = state
        .tasks
        .create_task(NewTask {
            project_id: req.project_id,
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task's mutable fields
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from)?;

    let task = state
        .tasks
        .update_task(
            id,
            EditTask {
                title: req.title,
                description: req.description,
                status: req.status,
                priority: req.priority,
                assignee_id: req.assignee_id,
                due_date: req.due_date,
            },
        )
        .await?;

    Ok(Json(task))
}

/// Update only a task's status
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<StatusMessage>> {
    state.tasks.update_task_status(id, &req.status).await?;

    Ok(Json(StatusMessage {
        success: true,
        message: "Status updated".to_string(),
    }))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn default_status() -> String {
    "TODO".to_string()
}

fn default_priority() -> String {
    "MEDIUM".to_string()
}
