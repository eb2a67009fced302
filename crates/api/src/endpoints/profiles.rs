//! Profile endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use edura_common::AppResult;
use edura_core::UpdateProfileInput;
use edura_db::entities::profile;
use serde::Serialize;

use super::users::PageQuery;
use crate::{
    extractors::{AdminUser, AuthUser},
    middleware::AppState,
    response::ApiResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_profiles))
        .route("/me", get(my_profile))
        .route("/me", put(update_my_profile))
        .route("/{user_id}", get(get_profile))
}

/// The authenticated user's own profile.
async fn my_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<profile::Model>> {
    let profile = state.profile_service.get(&user.id).await?;
    Ok(ApiResponse::ok(profile))
}

/// Update the authenticated user's own profile.
async fn update_my_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileInput>,
) -> AppResult<ApiResponse<profile::Model>> {
    let profile = state.profile_service.update(&user.id, req).await?;
    Ok(ApiResponse::ok(profile))
}

/// Get a profile by its owning user ID.
async fn get_profile(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<profile::Model>> {
    let profile = state.profile_service.get(&user_id).await?;
    Ok(ApiResponse::ok(profile))
}

/// List profiles response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListResponse {
    pub profiles: Vec<profile::Model>,
}

/// List profiles (admin only).
async fn list_profiles(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<ProfileListResponse>> {
    let profiles = state
        .profile_service
        .list(query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(ProfileListResponse { profiles }))
}
