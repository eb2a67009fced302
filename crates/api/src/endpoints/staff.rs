//! Staff endpoints: statuses, teachers, moderators.
//!
//! Teachers and moderators share one generic handler set; [`StaffAccess`]
//! picks the right service out of the state.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::{StaffInput, StaffService, StatusInput};
use edura_db::{
    entities::{moderator, status, teacher},
    repositories::{StaffEntity, StaffModel},
};
use sea_orm::{ActiveModelBehavior, IntoActiveModel, PrimaryKeyTrait};
use serde::Serialize;
use tracing::info;

use super::users::PageQuery;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Picks the service handling a staff entity out of the state.
pub trait StaffAccess: StaffEntity
where
    Self::Model: StaffModel,
{
    fn service(state: &AppState) -> &StaffService<Self>;
}

impl StaffAccess for teacher::Entity {
    fn service(state: &AppState) -> &StaffService<Self> {
        &state.teacher_service
    }
}

impl StaffAccess for moderator::Entity {
    fn service(state: &AppState) -> &StaffService<Self> {
        &state.moderator_service
    }
}

/// Create a staff router for one role.
pub fn router<E>() -> Router<AppState>
where
    E: StaffAccess + 'static,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    Router::new()
        .route("/", get(list_staff::<E>).post(create_staff::<E>))
        .route(
            "/{id}",
            get(get_staff::<E>)
                .put(update_staff::<E>)
                .delete(delete_staff::<E>),
        )
}

/// Staff row response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffResponse {
    pub id: String,
    pub profile_id: Option<String>,
    pub status_id: String,
}

impl StaffResponse {
    fn from_model<M: StaffModel>(model: &M) -> Self {
        Self {
            id: model.id().to_string(),
            profile_id: model.profile_id().map(str::to_string),
            status_id: model.status_id().to_string(),
        }
    }
}

/// List staff rows response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffListResponse {
    pub staff: Vec<StaffResponse>,
}

async fn create_staff<E>(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<StaffInput>,
) -> AppResult<ApiResponse<StaffResponse>>
where
    E: StaffAccess + 'static,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    info!(admin_id = %admin.id, role = E::ROLE, "Creating staff row");

    let model = E::service(&state).create(req).await?;
    Ok(ApiResponse::ok(StaffResponse::from_model(&model)))
}

async fn update_staff<E>(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StaffInput>,
) -> AppResult<ApiResponse<StaffResponse>>
where
    E: StaffAccess + 'static,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    let model = E::service(&state).update(&id, req).await?;
    Ok(ApiResponse::ok(StaffResponse::from_model(&model)))
}

async fn delete_staff<E>(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>>
where
    E: StaffAccess + 'static,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    E::service(&state).delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_staff<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<StaffResponse>>
where
    E: StaffAccess + 'static,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    let model = E::service(&state).get(&id).await?;
    Ok(ApiResponse::ok(StaffResponse::from_model(&model)))
}

async fn list_staff<E>(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<StaffListResponse>>
where
    E: StaffAccess + 'static,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    let models = E::service(&state).list(query.limit, query.offset).await?;

    Ok(ApiResponse::ok(StaffListResponse {
        staff: models.iter().map(StaffResponse::from_model).collect(),
    }))
}

// Statuses

/// Create the status router.
pub fn status_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_statuses).post(create_status))
        .route(
            "/{id}",
            get(get_status).put(update_status).delete(delete_status),
        )
}

/// List statuses response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListResponse {
    pub statuses: Vec<status::Model>,
}

async fn create_status(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<StatusInput>,
) -> AppResult<ApiResponse<status::Model>> {
    let status = state.status_service.create(req).await?;
    Ok(ApiResponse::ok(status))
}

async fn update_status(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusInput>,
) -> AppResult<ApiResponse<status::Model>> {
    let status = state.status_service.update(&id, req).await?;
    Ok(ApiResponse::ok(status))
}

async fn delete_status(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.status_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<status::Model>> {
    let status = state.status_service.get(&id).await?;
    Ok(ApiResponse::ok(status))
}

async fn list_statuses(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<StatusListResponse>> {
    let statuses = state.status_service.list(query.limit, query.offset).await?;
    Ok(ApiResponse::ok(StatusListResponse { statuses }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_staff_response_from_model() {
        let model = teacher::Model {
            id: "teacher1".to_string(),
            profile_id: Some("user1".to_string()),
            status_id: "status1".to_string(),
            created_at: Utc::now().into(),
        };

        let response = StaffResponse::from_model(&model);
        assert_eq!(response.id, "teacher1");
        assert_eq!(response.profile_id.as_deref(), Some("user1"));
    }
}
