//! Video rating endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::RateVideoInput;
use edura_db::entities::rating;
use serde::Serialize;

use super::users::PageQuery;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(rate_video))
        .route("/{id}", get(get_rating).delete(delete_rating))
}

/// List ratings response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingListResponse {
    pub ratings: Vec<rating::Model>,
}

/// Rate a video, once per user.
async fn rate_video(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<RateVideoInput>,
) -> AppResult<ApiResponse<rating::Model>> {
    let rating = state.rating_service.rate(&user.id, req).await?;
    Ok(ApiResponse::ok(rating))
}

/// Remove a rating; author only.
async fn delete_rating(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.rating_service.delete(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<rating::Model>> {
    let rating = state.rating_service.get(&id).await?;
    Ok(ApiResponse::ok(rating))
}

async fn list_ratings(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<RatingListResponse>> {
    let ratings = state.rating_service.list(query.limit, query.offset).await?;
    Ok(ApiResponse::ok(RatingListResponse { ratings }))
}
