/// Project endpoints
///
/// # Endpoints
///
/// - `GET    /v1/projects?username=` - The named user's projects
/// - `GET    /v1/projects/:id` - Project detail with its tasks
/// - `POST   /v1/projects` - Create project
/// - `PUT    /v1/projects/:id` - Update project
/// - `DELETE /v1/projects/:id` - Delete project
/// - `GET    /v1/projects/:id/members` - List members
/// - `POST   /v1/projects/:id/members` - Add member
/// - `DELETE /v1/projects/:id/members/:user_id` - Remove member
///
/// Session handling is external to this service, so the acting user is
/// an explicit `username` parameter where the original form flow used
/// the logged-in principal.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::models::project::{Project, ProjectDetails};
use taskboard_shared::models::project_member::{ProjectMember, ProjectMemberDetails};
use taskboard_shared::models::task::TaskDetails;
use taskboard_shared::services::project::NewProject;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Acting user; becomes the project owner
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,
}

/// Update project request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Add member request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: i64,

    /// Symbolic role name, defaults to MEMBER
    #[serde(default = "default_role")]
    pub role: String,
}

/// Project list query parameters
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub username: String,
}

/// Project detail response: the project and its tasks in board order
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub project: ProjectDetails,
    pub tasks: Vec<TaskDetails>,
}

/// The named user's projects, owned or joined
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<Json<Vec<ProjectDetails>>> {
    let projects = state.projects.list_user_projects(&query.username).await?;
    Ok(Json(projects))
}

/// Project detail with its tasks
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectDetailResponse>> {
    let project = state.projects.get_project(id).await?;
    let tasks = state.tasks.list_project_tasks(id).await?;

    Ok(Json(ProjectDetailResponse { project, tasks }))
}

/// Create a project owned by the acting user
///
/// # Errors
///
/// - `404 Not Found`: username does not resolve to a user
/// - `422 Unprocessable Entity`: field constraints failed
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate().map_err(ApiError::from)?;

    let project = state
        .projects
        .create_project(
            NewProject {
                name: req.name,
                description: req.description,
            },
            &req.username,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Update a project's name and description
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate().map_err(ApiError::from)?;

    let project = state
        .projects
        .update_project(
            id,
            NewProject {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(project))
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.projects.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a project's members
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<ProjectMemberDetails>>> {
    let members = state.projects.list_members(id).await?;
    Ok(Json(members))
}

/// Add a user to a project
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<ProjectMember>)> {
    let member = state.projects.add_member(id, req.user_id, &req.role).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Remove a user from a project
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state.projects.remove_member(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn default_role() -> String {
    "MEMBER".to_string()
}
