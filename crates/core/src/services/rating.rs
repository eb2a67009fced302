//! Rating service.

use edura_common::{AppError, AppResult, IdGenerator};
use edura_db::{
    entities::rating,
    repositories::{LessonVideoRepository, RatingRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Rating service for business logic.
#[derive(Clone)]
pub struct RatingService {
    rating_repo: RatingRepository,
    video_repo: LessonVideoRepository,
    id_gen: IdGenerator,
}

/// Input for rating a video.
#[derive(Debug, Deserialize, Validate)]
pub struct RateVideoInput {
    pub lesson_video_id: String,

    /// 1 to 5 stars.
    #[validate(range(min = 1, max = 5))]
    pub score: i16,
}

impl RatingService {
    /// Create a new rating service.
    #[must_use]
    pub fn new(rating_repo: RatingRepository, video_repo: LessonVideoRepository) -> Self {
        Self {
            rating_repo,
            video_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Rate a video once per user.
    ///
    /// A second rating for the same video conflicts. The pre-check catches
    /// the common case; the unique index catches the race.
    pub async fn rate(&self, user_id: &str, input: RateVideoInput) -> AppResult<rating::Model> {
        input.validate()?;

        self.video_repo.get_by_id(&input.lesson_video_id).await?;

        if self
            .rating_repo
            .find_by_video_and_user(&input.lesson_video_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "video already rated by this user".to_string(),
            ));
        }

        let model = rating::ActiveModel {
            id: Set(self.id_gen.generate()),
            lesson_video_id: Set(input.lesson_video_id),
            user_id: Set(Some(user_id.to_string())),
            score: Set(input.score),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.rating_repo.create(model).await
    }

    /// Remove a rating. Only its author may do so.
    pub async fn delete(&self, user_id: &str, rating_id: &str) -> AppResult<()> {
        let rating = self.rating_repo.get_by_id(rating_id).await?;

        if rating.user_id.as_deref() != Some(user_id) {
            return Err(AppError::Forbidden(
                "only the rating author can remove it".to_string(),
            ));
        }

        self.rating_repo.delete(rating).await
    }

    /// Get a rating by ID.
    pub async fn get(&self, id: &str) -> AppResult<rating::Model> {
        self.rating_repo.get_by_id(id).await
    }

    /// List ratings (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<rating::Model>> {
        self.rating_repo.find_all(limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edura_db::entities::lesson_video;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_video(id: &str) -> lesson_video::Model {
        lesson_video::Model {
            id: id.to_string(),
            lesson_id: None,
            name: "Setup".to_string(),
            video_url: "/files/setup.mp4".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_rating(id: &str, score: i16) -> rating::Model {
        rating::Model {
            id: id.to_string(),
            lesson_video_id: "video1".to_string(),
            user_id: Some("user1".to_string()),
            score,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> RatingService {
        RatingService::new(RatingRepository::new(db.clone()), LessonVideoRepository::new(db))
    }

    #[tokio::test]
    async fn test_rate_rejects_out_of_range_score() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        for score in [0, 6] {
            let result = service
                .rate(
                    "user1",
                    RateVideoInput {
                        lesson_video_id: "video1".to_string(),
                        score,
                    },
                )
                .await;
            assert!(result.is_err(), "score {score} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_rate_duplicate_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_video("video1")]])
                .append_query_results([[create_test_rating("rating1", 4)]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .rate(
                "user1",
                RateVideoInput {
                    lesson_video_id: "video1".to_string(),
                    score: 5,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_rate_first_time_succeeds() {
        let created = create_test_rating("rating1", 5);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_video("video1")]])
                .append_query_results([Vec::<rating::Model>::new()])
                .append_query_results([[created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .rate(
                "user1",
                RateVideoInput {
                    lesson_video_id: "video1".to_string(),
                    score: 5,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.score, 5);
    }

    #[tokio::test]
    async fn test_delete_foreign_rating_forbidden() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_rating("rating1", 4)]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service.delete("someone_else", "rating1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
