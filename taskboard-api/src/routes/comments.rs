/// Comment endpoints
///
/// # Endpoints
///
/// - `GET    /v1/tasks/:id/comments` - A task's comments, newest first
/// - `POST   /v1/tasks/:id/comments` - Add a comment
/// - `PUT    /v1/comments/:id` - Edit a comment
/// - `DELETE /v1/comments/:id` - Delete a comment

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
use taskboard_shared::models::comment::{Comment, CommentDetails};
use taskboard_shared::services::comment::NewComment;
use validator::Validate;

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Author
    pub user_id: i64,

    #[validate(length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters"))]
    pub content: String,
}

/// Update comment request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be between 1 and 2000 characters"))]
    pub content: String,
}

/// A task's comments, newest first
pub async fn list_task_comments(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Vec<CommentDetails>>> {
    let comments = state.comments.list_task_comments(task_id).await?;
    Ok(Json(comments))
}

/// Add a comment to a task
///
/// # Errors
///
/// - `404 Not Found`: the task does not exist
pub async fn create_comment(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    req.validate().map_err(ApiError::from)?;

    let comment = state
        .comments
        .add_comment(NewComment {
            task_id,
            user_id: req.user_id,
            content: req.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Edit a comment's body
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> ApiResult<Json<Comment>> {
    req.validate().map_err(ApiError::from)?;

    let comment = state.comments.update_comment(id, &req.content).await?;
    Ok(Json(comment))
}

/// Delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.comments.delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
