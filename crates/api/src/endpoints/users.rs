//! User administration endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use serde::{Deserialize, Serialize};

use super::auth::UserResponse;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user))
}

/// Pagination query shared by the list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

pub(super) const fn default_limit() -> u64 {
    20
}

/// List users response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

/// List users, newest first (admin only).
async fn list_users(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<UserListResponse>> {
    let users = state.user_service.list(query.limit, query.offset).await?;

    Ok(ApiResponse::ok(UserListResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// Get a single user (admin only).
async fn get_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get(&id).await?;

    Ok(ApiResponse::ok(UserResponse::from(user)))
}
