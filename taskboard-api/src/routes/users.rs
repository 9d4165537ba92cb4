/// User endpoints
///
/// # Endpoints
///
/// - `POST /v1/users` - Register a user
/// - `GET  /v1/users` - All users ordered by username
/// - `GET  /v1/users/:id` - User detail
/// - `PUT  /v1/users/:id` - Update email and display name
/// - `POST /v1/users/:id/password` - Change password
///
/// The password hash never appears in responses; the `User` record
/// skips it on serialization.

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
use taskboard_shared::models::user::User;
use taskboard_shared::services::user::{EditProfile, NewUser};
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Register a new user
///
/// # Errors
///
/// - `409 Conflict`: username or email already exists
/// - `422 Unprocessable Entity`: field constraints failed
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate().map_err(ApiError::from)?;

    let user = state
        .users
        .register_user(NewUser {
            username: req.username,
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// All users ordered by username
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

/// User detail
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = state.users.get_user(id).await?;
    Ok(Json(user))
}

/// Update a user's email and display name
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    req.validate().map_err(ApiError::from)?;

    let user = state
        .users
        .update_profile(
            id,
            EditProfile {
                email: req.email,
                name: req.name,
            },
        )
        .await?;

    Ok(Json(user))
}

/// Change a user's password
///
/// # Errors
///
/// - `404 Not Found`: the user does not exist
/// - `422 Unprocessable Entity`: wrong current password or weak new one
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    req.validate().map_err(ApiError::from)?;

    state
        .users
        .change_password(id, &req.current_password, &req.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
