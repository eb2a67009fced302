//! Lesson endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::{CreateLessonInput, UpdateLessonInput};
use edura_db::entities::{comment, lesson, lesson_video};
use serde::Serialize;

use super::users::PageQuery;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lessons).post(create_lesson))
        .route(
            "/{id}",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
        .route("/{id}/videos", get(list_lesson_videos))
        .route("/{id}/comments", get(list_lesson_comments))
}

/// List lessons response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonListResponse {
    pub lessons: Vec<lesson::Model>,
}

async fn create_lesson(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateLessonInput>,
) -> AppResult<ApiResponse<lesson::Model>> {
    let lesson = state.lesson_service.create(req).await?;
    Ok(ApiResponse::ok(lesson))
}

async fn update_lesson(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateLessonInput>,
) -> AppResult<ApiResponse<lesson::Model>> {
    let lesson = state.lesson_service.update(&id, req).await?;
    Ok(ApiResponse::ok(lesson))
}

async fn delete_lesson(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.lesson_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<lesson::Model>> {
    let lesson = state.lesson_service.get(&id).await?;
    Ok(ApiResponse::ok(lesson))
}

async fn list_lessons(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<LessonListResponse>> {
    let lessons = state.lesson_service.list(query.limit, query.offset).await?;
    Ok(ApiResponse::ok(LessonListResponse { lessons }))
}

/// Videos of a lesson response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonVideoListResponse {
    pub videos: Vec<lesson_video::Model>,
}

async fn list_lesson_videos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LessonVideoListResponse>> {
    let videos = state.video_service.list_by_lesson(&id).await?;
    Ok(ApiResponse::ok(LessonVideoListResponse { videos }))
}

/// Comments of a lesson response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCommentListResponse {
    pub comments: Vec<comment::Model>,
}

/// Comments on a lesson, oldest first.
async fn list_lesson_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LessonCommentListResponse>> {
    let comments = state.comment_service.list_by_lesson(&id).await?;
    Ok(ApiResponse::ok(LessonCommentListResponse { comments }))
}
