/// Tag endpoints
///
/// # Endpoints
///
/// - `GET    /v1/tags` - All tags ordered by name
/// - `POST   /v1/tags` - Create a tag
/// - `DELETE /v1/tags/:id` - Delete a tag
/// - `GET    /v1/tasks/:id/tags` - A task's tags
/// - `POST   /v1/tasks/:id/tags` - Attach a tag to a task
/// - `DELETE /v1/tasks/:id/tags/:tag_id` - Detach a tag from a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::tag::{Tag, TaskTag};
use taskboard_shared::services::tag::NewTag;
use validator::Validate;

/// Create tag request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    /// Display color as a hex string (e.g. "#dc3545")
    #[validate(length(min = 4, max = 7, message = "Color must be a hex color string"))]
    pub color: String,
}

/// Attach tag request
#[derive(Debug, Deserialize)]
pub struct TagTaskRequest {
    pub tag_id: i64,
}

/// All tags ordered by name
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<Tag>>> {
    let tags = state.tags.list_tags().await?;
    Ok(Json(tags))
}

/// Create a tag
///
/// # Errors
///
/// - `409 Conflict`: the name is already taken
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    req.validate().map_err(ApiError::from)?;

    let tag = state
        .tags
        .create_tag(NewTag {
            name: req.name,
            color: req.color,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

/// Delete a tag
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tags.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A task's tags ordered by name
pub async fn list_task_tags(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Vec<Tag>>> {
    let tags = state.tags.list_task_tags(task_id).await?;
    Ok(Json(tags))
}

/// Attach a tag to a task
///
/// # Errors
///
/// - `404 Not Found`: the task or tag does not exist
/// - `409 Conflict`: the tag is already attached
pub async fn tag_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(req): Json<TagTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskTag>)> {
    let association = state.tags.tag_task(task_id, req.tag_id).await?;
    Ok((StatusCode::CREATED, Json(association)))
}

/// Detach a tag from a task
pub async fn untag_task(
    State(state): State<AppState>,
    Path((task_id, tag_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state.tags.untag_task(task_id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
