//! Homework endpoints: assignments and submissions.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::{CreateHomeworkInput, SubmitHomeworkInput, UpdateHomeworkInput};
use edura_db::entities::{homework_submission, lesson_homework};
use serde::Serialize;
use tracing::info;

use super::users::PageQuery;
use crate::{
    extractors::{AdminUser, AuthUser},
    middleware::AppState,
    response::ApiResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_homework).post(create_homework))
        .route(
            "/{id}",
            get(get_homework).put(update_homework).delete(delete_homework),
        )
        .route("/{id}/submissions", get(list_homework_submissions))
}

/// Router for the submissions resource, mounted separately from the
/// assignments it belongs to.
pub fn submissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(submit_homework))
        .route("/{id}", get(get_submission))
}

/// List assignments response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkListResponse {
    pub homework: Vec<lesson_homework::Model>,
}

/// List submissions response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionListResponse {
    pub submissions: Vec<homework_submission::Model>,
}

async fn create_homework(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateHomeworkInput>,
) -> AppResult<ApiResponse<lesson_homework::Model>> {
    let homework = state.homework_service.create(req).await?;
    Ok(ApiResponse::ok(homework))
}

async fn update_homework(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHomeworkInput>,
) -> AppResult<ApiResponse<lesson_homework::Model>> {
    let homework = state.homework_service.update(&id, req).await?;
    Ok(ApiResponse::ok(homework))
}

async fn delete_homework(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.homework_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_homework(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<lesson_homework::Model>> {
    let homework = state.homework_service.get(&id).await?;
    Ok(ApiResponse::ok(homework))
}

async fn list_homework(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<HomeworkListResponse>> {
    let homework = state
        .homework_service
        .list(query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(HomeworkListResponse { homework }))
}

/// Hand in a solution. Rejected once the deadline has passed.
async fn submit_homework(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitHomeworkInput>,
) -> AppResult<ApiResponse<homework_submission::Model>> {
    info!(
        student_id = %user.id,
        homework_id = %req.lesson_homework_id,
        "Submitting homework"
    );

    let submission = state.homework_service.submit(&user.id, req).await?;
    Ok(ApiResponse::ok(submission))
}

async fn get_submission(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<homework_submission::Model>> {
    let submission = state.homework_service.get_submission(&id).await?;
    Ok(ApiResponse::ok(submission))
}

async fn list_submissions(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<SubmissionListResponse>> {
    let submissions = state
        .homework_service
        .list_submissions(query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(SubmissionListResponse { submissions }))
}

/// Submissions handed in for one assignment (admin only).
async fn list_homework_submissions(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<SubmissionListResponse>> {
    let submissions = state.homework_service.submissions_for(&id).await?;
    Ok(ApiResponse::ok(SubmissionListResponse { submissions }))
}
