//! Lesson comment endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::CreateCommentInput;
use edura_db::entities::comment;
use serde::Serialize;

use super::users::PageQuery;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/{id}", get(get_comment).delete(delete_comment))
}

/// List comments response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: Vec<comment::Model>,
}

/// Post a comment on a lesson.
async fn create_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCommentInput>,
) -> AppResult<ApiResponse<comment::Model>> {
    let comment = state.comment_service.create(&user.id, req).await?;
    Ok(ApiResponse::ok(comment))
}

/// Remove a comment; author only.
async fn delete_comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.comment_service.delete(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<comment::Model>> {
    let comment = state.comment_service.get(&id).await?;
    Ok(ApiResponse::ok(comment))
}

async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<CommentListResponse>> {
    let comments = state
        .comment_service
        .list(query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(CommentListResponse { comments }))
}
