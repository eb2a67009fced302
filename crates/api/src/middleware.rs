//! API middleware.

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use edura_common::{StorageBackend, TokenIssuer};
use edura_core::{
    CategoryService, CommentService, CourseService, HomeworkService, LessonService,
    LessonVideoService, MailDeliveryService, ModeratorService, ProfileService, RatingService,
    StatusService, TeacherService, UserService,
};
use edura_db::repositories::UserRepository;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub profile_service: ProfileService,
    pub status_service: StatusService,
    pub teacher_service: TeacherService,
    pub moderator_service: ModeratorService,
    pub category_service: CategoryService,
    pub course_service: CourseService,
    pub lesson_service: LessonService,
    pub video_service: LessonVideoService,
    pub homework_service: HomeworkService,
    pub rating_service: RatingService,
    pub comment_service: CommentService,
    pub mailer: MailDeliveryService,
    pub storage: Arc<dyn StorageBackend>,
    pub tokens: TokenIssuer,
    pub user_repo: UserRepository,
}

/// Authentication middleware.
///
/// Resolves a bearer access token to its user and stores the model in the
/// request extensions. Requests without a valid token pass through
/// unauthenticated; the extractors decide what that means per route.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(claims) = state.tokens.verify_access(token)
        && let Ok(Some(user)) = state.user_repo.find_by_id(&claims.sub).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
