//! User profile and follow handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::domain::CurrentUser;
use crate::errors::AppResult;
use crate::types::{Ack, UserResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id/follow", post(follow_user).delete(unfollow_user))
}

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = UserResponse),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let view = state.user_service.profile(user.id).await?;
    Ok(Json(UserResponse::new(view)))
}

/// Get a user's profile by ID
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let view = state.user_service.profile(user_id).await?;
    Ok(Json(UserResponse::new(view)))
}

/// Follow a user
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/follow",
    tag = "Users",
    security(("api_key" = [])),
    params(("user_id" = i32, Path, description = "User to follow")),
    responses(
        (status = 201, description = "Now following", body = Ack),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Already following, or following yourself")
    )
)]
pub async fn follow_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<i32>,
) -> AppResult<(StatusCode, Json<Ack>)> {
    state.user_service.follow(user.id, user_id).await?;
    Ok(Ack::created())
}

/// Unfollow a user
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/follow",
    tag = "Users",
    security(("api_key" = [])),
    params(("user_id" = i32, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "No longer following", body = Ack),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Not following this user")
    )
)]
pub async fn unfollow_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Ack>> {
    state.user_service.unfollow(user.id, user_id).await?;
    Ok(Ack::ok())
}
