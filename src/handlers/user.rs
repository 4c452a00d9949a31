//! User-related API handlers

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::extract::{JsonBody, UserId};
use crate::user::{User, UserRequest, UserService};

/// Create a new user
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<Json<User>> {
    let user = service.create_user(request).await?;
    Ok(Json(user))
}

/// Get a user by ID
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    UserId(id): UserId,
) -> ApiResult<Json<User>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace a user's fields
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    UserId(id): UserId,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<StatusCode> {
    service.update_user(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    UserId(id): UserId,
) -> ApiResult<StatusCode> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
