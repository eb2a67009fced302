//! API endpoints.

mod admin;
mod auth;
mod categories;
mod comments;
mod courses;
mod files;
mod homework;
mod lessons;
mod profiles;
mod ratings;
mod staff;
mod users;
mod videos;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/profiles", profiles::router())
        .nest("/statuses", staff::status_router())
        .nest("/teachers", staff::router::<edura_db::entities::teacher::Entity>())
        .nest("/moderators", staff::router::<edura_db::entities::moderator::Entity>())
        .nest("/categories", categories::router())
        .nest("/courses", courses::router())
        .nest("/lessons", lessons::router())
        .nest("/videos", videos::router())
        .nest("/homework", homework::router())
        .nest("/submissions", homework::submissions_router())
        .nest("/ratings", ratings::router())
        .nest("/comments", comments::router())
        .nest("/files", files::router())
        .nest("/admin", admin::router())
}
