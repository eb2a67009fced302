//! Category endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::CategoryInput;
use edura_db::entities::category;
use serde::Serialize;

use super::users::PageQuery;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// List categories response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListResponse {
    pub categories: Vec<category::Model>,
}

async fn create_category(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CategoryInput>,
) -> AppResult<ApiResponse<category::Model>> {
    let category = state.category_service.create(req).await?;
    Ok(ApiResponse::ok(category))
}

async fn update_category(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CategoryInput>,
) -> AppResult<ApiResponse<category::Model>> {
    let category = state.category_service.update(&id, req).await?;
    Ok(ApiResponse::ok(category))
}

async fn delete_category(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.category_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<category::Model>> {
    let category = state.category_service.get(&id).await?;
    Ok(ApiResponse::ok(category))
}

async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<CategoryListResponse>> {
    let categories = state
        .category_service
        .list(query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(CategoryListResponse { categories }))
}
