//! Lesson video service.

use edura_common::{
    AppError, AppResult, IdGenerator,
    validation::{VIDEO_EXTENSIONS, validate_extension},
};
use edura_db::{
    entities::lesson_video,
    repositories::{LessonRepository, LessonVideoRepository, RatingRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lesson video service for business logic.
#[derive(Clone)]
pub struct LessonVideoService {
    video_repo: LessonVideoRepository,
    lesson_repo: LessonRepository,
    rating_repo: RatingRepository,
    id_gen: IdGenerator,
}

/// Input for creating a video.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVideoInput {
    pub lesson_id: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    /// Must carry an allowed video extension.
    #[validate(length(min = 1, max = 1024))]
    pub video_url: String,
}

/// Input for updating a video.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVideoInput {
    pub lesson_id: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 1024))]
    pub video_url: Option<String>,
}

/// A video with its rating aggregates, computed fresh on every read.
#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    #[serde(flatten)]
    pub video: lesson_video::Model,
    /// Mean score rounded to two decimals; 0.0 with no ratings.
    pub average_rating: f64,
    pub ratings_count: u64,
}

impl LessonVideoService {
    /// Create a new lesson video service.
    #[must_use]
    pub fn new(
        video_repo: LessonVideoRepository,
        lesson_repo: LessonRepository,
        rating_repo: RatingRepository,
    ) -> Self {
        Self {
            video_repo,
            lesson_repo,
            rating_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a video.
    pub async fn create(&self, input: CreateVideoInput) -> AppResult<lesson_video::Model> {
        input.validate()?;

        validate_extension(&input.video_url, VIDEO_EXTENSIONS)?;

        if let Some(lesson_id) = &input.lesson_id {
            self.lesson_repo.get_by_id(lesson_id).await?;
        }

        let model = lesson_video::ActiveModel {
            id: Set(self.id_gen.generate()),
            lesson_id: Set(input.lesson_id),
            name: Set(input.name),
            video_url: Set(input.video_url),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.video_repo.create(model).await
    }

    /// Update a video.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateVideoInput,
    ) -> AppResult<lesson_video::Model> {
        input.validate()?;

        if let Some(video_url) = &input.video_url {
            validate_extension(video_url, VIDEO_EXTENSIONS)?;
        }

        let video = self.video_repo.get_by_id(id).await?;

        if let Some(lesson_id) = &input.lesson_id {
            self.lesson_repo.get_by_id(lesson_id).await?;
        }

        let mut active: lesson_video::ActiveModel = video.into();

        if let Some(lesson_id) = input.lesson_id {
            active.lesson_id = Set(Some(lesson_id));
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(video_url) = input.video_url {
            active.video_url = Set(video_url);
        }

        self.video_repo.update(active).await
    }

    /// Delete a video.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let video = self.video_repo.get_by_id(id).await?;
        self.video_repo.delete(video).await
    }

    /// Get a video with its rating aggregates.
    pub async fn get(&self, id: &str) -> AppResult<VideoSummary> {
        let video = self.video_repo.get_by_id(id).await?;
        self.summarize(video).await
    }

    /// List videos with their rating aggregates (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<VideoSummary>> {
        let videos = self.video_repo.find_all(limit, offset).await?;

        let mut summaries = Vec::with_capacity(videos.len());
        for video in videos {
            summaries.push(self.summarize(video).await?);
        }
        Ok(summaries)
    }

    /// List the videos of a lesson.
    pub async fn list_by_lesson(&self, lesson_id: &str) -> AppResult<Vec<lesson_video::Model>> {
        self.lesson_repo.get_by_id(lesson_id).await?;
        self.video_repo.find_by_lesson(lesson_id).await
    }

    async fn summarize(&self, video: lesson_video::Model) -> AppResult<VideoSummary> {
        let scores = self.rating_repo.scores_for_video(&video.id).await?;
        let ratings_count = scores.len() as u64;
        let average_rating = average(&scores);

        Ok(VideoSummary {
            video,
            average_rating,
            ratings_count,
        })
    }
}

/// Mean score rounded to two decimals; 0.0 for an empty slice.
fn average(scores: &[i16]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    let mean = sum as f64 / scores.len() as f64;
    (mean * 100.0).round() / 100.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_video(id: &str) -> lesson_video::Model {
        lesson_video::Model {
            id: id.to_string(),
            lesson_id: None,
            name: "Setup".to_string(),
            video_url: "/files/2025/03/01/setup.mp4".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> LessonVideoService {
        LessonVideoService::new(
            LessonVideoRepository::new(db.clone()),
            LessonRepository::new(db.clone()),
            RatingRepository::new(db),
        )
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        // (5 + 4 + 4) / 3 = 4.333...
        assert_eq!(average(&[5, 4, 4]), 4.33);
        // (5 + 4) / 2 = 4.5
        assert_eq!(average(&[5, 4]), 4.5);
    }

    #[tokio::test]
    async fn test_create_rejects_disallowed_extension() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(CreateVideoInput {
                lesson_id: None,
                name: "Setup".to_string(),
                video_url: "/files/setup.avi".to_string(),
            })
            .await;

        // The allow-list message is surfaced directly, without an extra
        // "Validation error:" prefix.
        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "File extension must be one of: mp4, wmv");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_accepts_wmv_uppercase() {
        let video = create_test_video("video1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[video.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .create(CreateVideoInput {
                lesson_id: None,
                name: "Setup".to_string(),
                video_url: "/files/setup.WMV".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_summarizes_ratings() {
        let video = create_test_video("video1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[video.clone()]])
                .append_query_results([vec![
                    score_row(5),
                    score_row(4),
                    score_row(4),
                ]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let summary = service.get("video1").await.unwrap();
        assert_eq!(summary.average_rating, 4.33);
        assert_eq!(summary.ratings_count, 3);
    }

    fn score_row(score: i16) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        std::collections::BTreeMap::from([("score", sea_orm::Value::SmallInt(Some(score)))])
    }
}
