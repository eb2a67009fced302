//! Course endpoints.
//!
//! Reads return courses with their aggregates (lesson and student counts,
//! total price); enrollment is replaced wholesale through the students
//! subresource.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use edura_common::AppResult;
use edura_core::{CourseSummary, CreateCourseInput, UpdateCourseInput};
use edura_db::{entities::course, repositories::CourseFilter};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/{id}/students", get(list_students).put(set_students))
        .route("/{id}/lessons", get(list_course_lessons))
}

/// List courses response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
}

/// Pagination plus the optional course filters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListQuery {
    #[serde(default = "super::users::default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    pub search: Option<String>,
    pub category_id: Option<String>,
}

async fn create_course(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCourseInput>,
) -> AppResult<ApiResponse<course::Model>> {
    info!(admin_id = %admin.id, name = %req.name, "Creating course");

    let course = state.course_service.create(req).await?;
    Ok(ApiResponse::ok(course))
}

async fn update_course(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCourseInput>,
) -> AppResult<ApiResponse<course::Model>> {
    info!(admin_id = %admin.id, course_id = %id, "Updating course");

    let course = state.course_service.update(&id, req).await?;
    Ok(ApiResponse::ok(course))
}

async fn delete_course(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    info!(admin_id = %admin.id, course_id = %id, "Deleting course");

    state.course_service.delete(&id).await?;
    Ok(ApiResponse::ok(()))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<CourseSummary>> {
    let summary = state.course_service.get(&id).await?;
    Ok(ApiResponse::ok(summary))
}

async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> AppResult<ApiResponse<CourseListResponse>> {
    let filter = CourseFilter {
        search: query.search,
        category_id: query.category_id,
    };
    let courses = state
        .course_service
        .list(&filter, query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(CourseListResponse { courses }))
}

/// Replace-enrollment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStudentsRequest {
    pub user_ids: Vec<String>,
}

/// Enrollment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListResponse {
    pub user_ids: Vec<String>,
}

/// Replace the full enrollment set of a course (admin only).
async fn set_students(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetStudentsRequest>,
) -> AppResult<ApiResponse<StudentListResponse>> {
    info!(
        admin_id = %admin.id,
        course_id = %id,
        students = req.user_ids.len(),
        "Replacing course enrollment"
    );

    state.course_service.set_students(&id, req.user_ids).await?;
    let user_ids = state.course_service.students(&id).await?;

    Ok(ApiResponse::ok(StudentListResponse { user_ids }))
}

async fn list_students(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<StudentListResponse>> {
    let user_ids = state.course_service.students(&id).await?;
    Ok(ApiResponse::ok(StudentListResponse { user_ids }))
}

/// Lessons of a course, in creation order.
async fn list_course_lessons(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<super::lessons::LessonListResponse>> {
    let lessons = state.lesson_service.list_by_course(&id).await?;
    Ok(ApiResponse::ok(super::lessons::LessonListResponse {
        lessons,
    }))
}
