//! Lesson video repository.

use std::sync::Arc;

use crate::entities::{LessonVideo, lesson, lesson_video};
use edura_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

/// Lesson video repository for database operations.
#[derive(Clone)]
pub struct LessonVideoRepository {
    db: Arc<DatabaseConnection>,
}

impl LessonVideoRepository {
    /// Create a new lesson video repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a video by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<lesson_video::Model>> {
        LessonVideo::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a video by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<lesson_video::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("lesson video {id}")))
    }

    /// Create a video.
    pub async fn create(&self, model: lesson_video::ActiveModel) -> AppResult<lesson_video::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a video.
    pub async fn update(&self, model: lesson_video::ActiveModel) -> AppResult<lesson_video::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a video. Homework under it survives with a NULL video;
    /// ratings are removed by the cascade.
    pub async fn delete(&self, model: lesson_video::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List videos (paginated), oldest first.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<lesson_video::Model>> {
        LessonVideo::find()
            .order_by_asc(lesson_video::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the videos of a lesson, oldest first.
    pub async fn find_by_lesson(&self, lesson_id: &str) -> AppResult<Vec<lesson_video::Model>> {
        LessonVideo::find()
            .filter(lesson_video::Column::LessonId.eq(lesson_id))
            .order_by_asc(lesson_video::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count the videos of a course across all of its lessons.
    ///
    /// Joins through the lesson table; computed fresh on every course read.
    pub async fn count_by_course(&self, course_id: &str) -> AppResult<u64> {
        LessonVideo::find()
            .join(JoinType::InnerJoin, lesson_video::Relation::Lesson.def())
            .filter(lesson::Column::CourseId.eq(course_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    fn create_test_video(id: &str, name: &str) -> lesson_video::Model {
        lesson_video::Model {
            id: id.to_string(),
            lesson_id: Some("lesson1".to_string()),
            name: name.to_string(),
            video_url: "/files/2025/03/01/video1.mp4".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let video = create_test_video("video1", "Setup");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[video.clone()]])
                .into_connection(),
        );

        let repo = LessonVideoRepository::new(db);
        let result = repo.get_by_id("video1").await.unwrap();

        assert_eq!(result.name, "Setup");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<lesson_video::Model>::new()])
                .into_connection(),
        );

        let repo = LessonVideoRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_video() {
        let video = create_test_video("video1", "Setup");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[video.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LessonVideoRepository::new(db);

        let active = lesson_video::ActiveModel {
            id: Set("video1".to_string()),
            name: Set("Setup".to_string()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.name, "Setup");
    }

    #[tokio::test]
    async fn test_find_by_lesson() {
        let v1 = create_test_video("video1", "Setup");
        let v2 = create_test_video("video2", "First steps");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[v1, v2]])
                .into_connection(),
        );

        let repo = LessonVideoRepository::new(db);
        let result = repo.find_by_lesson("lesson1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
