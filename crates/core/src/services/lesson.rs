//! Lesson service.

use edura_common::{AppResult, IdGenerator};
use edura_db::{
    entities::lesson,
    repositories::{CourseRepository, LessonRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Lesson service for business logic.
#[derive(Clone)]
pub struct LessonService {
    lesson_repo: LessonRepository,
    course_repo: CourseRepository,
    id_gen: IdGenerator,
}

/// Input for creating a lesson.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLessonInput {
    pub course_id: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub title: String,
}

/// Input for updating a lesson.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLessonInput {
    pub course_id: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
}

impl LessonService {
    /// Create a new lesson service.
    #[must_use]
    pub fn new(lesson_repo: LessonRepository, course_repo: CourseRepository) -> Self {
        Self {
            lesson_repo,
            course_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a lesson, optionally attached to a course.
    pub async fn create(&self, input: CreateLessonInput) -> AppResult<lesson::Model> {
        input.validate()?;

        if let Some(course_id) = &input.course_id {
            self.course_repo.get_by_id(course_id).await?;
        }

        let model = lesson::ActiveModel {
            id: Set(self.id_gen.generate()),
            course_id: Set(input.course_id),
            title: Set(input.title),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.lesson_repo.create(model).await
    }

    /// Update a lesson.
    pub async fn update(&self, id: &str, input: UpdateLessonInput) -> AppResult<lesson::Model> {
        input.validate()?;

        let lesson = self.lesson_repo.get_by_id(id).await?;

        if let Some(course_id) = &input.course_id {
            self.course_repo.get_by_id(course_id).await?;
        }

        let mut active: lesson::ActiveModel = lesson.into();

        if let Some(course_id) = input.course_id {
            active.course_id = Set(Some(course_id));
        }
        if let Some(title) = input.title {
            active.title = Set(title);
        }

        self.lesson_repo.update(active).await
    }

    /// Delete a lesson.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let lesson = self.lesson_repo.get_by_id(id).await?;
        self.lesson_repo.delete(lesson).await
    }

    /// Get a lesson by ID.
    pub async fn get(&self, id: &str) -> AppResult<lesson::Model> {
        self.lesson_repo.get_by_id(id).await
    }

    /// List lessons (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<lesson::Model>> {
        self.lesson_repo.find_all(limit, offset).await
    }

    /// List the lessons of a course.
    pub async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<lesson::Model>> {
        self.course_repo.get_by_id(course_id).await?;
        self.lesson_repo.find_by_course(course_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edura_common::AppError;
    use edura_db::entities::course;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> LessonService {
        LessonService::new(LessonRepository::new(db.clone()), CourseRepository::new(db))
    }

    #[tokio::test]
    async fn test_create_with_unknown_course() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .create(CreateLessonInput {
                course_id: Some("ghost".to_string()),
                title: "Intro".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::CourseNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_unattached_lesson() {
        let lesson = lesson::Model {
            id: "lesson1".to_string(),
            course_id: None,
            title: "Intro".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[lesson.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .create(CreateLessonInput {
                course_id: None,
                title: "Intro".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.title, "Intro");
        assert!(result.course_id.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(CreateLessonInput {
                course_id: None,
                title: String::new(),
            })
            .await;

        assert!(result.is_err());
    }
}
