//! Lesson video endpoints.
//!
//! Reads return videos with their rating aggregates.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::{CreateVideoInput, UpdateVideoInput, VideoSummary};
use edura_db::entities::lesson_video;
use serde::Serialize;

use super::users::PageQuery;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_videos).post(create_video))
        .route(
            "/{id}",
            get(get_video).put(update_video).delete(delete_video),
        )
}

/// List videos response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    pub videos: Vec<VideoSummary>,
}

async fn create_video(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateVideoInput>,
) -> AppResult<ApiResponse<lesson_video::Model>> {
    let video = state.video_service.create(req).await?;
    Ok(ApiResponse::ok(video))
}

async fn update_video(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVideoInput>,
) -> AppResult<ApiResponse<lesson_video::Model>> {
    let video = state.video_service.update(&id, req).await?;
    Ok(ApiResponse::ok(video))
}

async fn delete_video(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.video_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<VideoSummary>> {
    let summary = state.video_service.get(&id).await?;
    Ok(ApiResponse::ok(summary))
}

async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<VideoListResponse>> {
    let videos = state.video_service.list(query.limit, query.offset).await?;
    Ok(ApiResponse::ok(VideoListResponse { videos }))
}
