//! Comment service.

use edura_common::{AppError, AppResult, IdGenerator};
use edura_db::{
    entities::comment,
    repositories::{CommentRepository, LessonRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Lesson comment service.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    lesson_repo: LessonRepository,
    id_gen: IdGenerator,
}

/// Input for posting a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentInput {
    pub lesson_id: String,

    #[validate(length(min = 1, max = 4096))]
    pub text: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(comment_repo: CommentRepository, lesson_repo: LessonRepository) -> Self {
        Self {
            comment_repo,
            lesson_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a comment on a lesson.
    pub async fn create(
        &self,
        user_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        self.lesson_repo.get_by_id(&input.lesson_id).await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            lesson_id: Set(input.lesson_id),
            user_id: Set(user_id.to_string()),
            text: Set(input.text),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.comment_repo.create(model).await
    }

    /// Delete a comment. Only its author may do so.
    pub async fn delete(&self, user_id: &str, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden(
                "only the comment author can remove it".to_string(),
            ));
        }

        self.comment_repo.delete(comment).await
    }

    /// Get a comment by ID.
    pub async fn get(&self, id: &str) -> AppResult<comment::Model> {
        self.comment_repo.get_by_id(id).await
    }

    /// List the comments on a lesson, oldest first.
    pub async fn list_by_lesson(&self, lesson_id: &str) -> AppResult<Vec<comment::Model>> {
        self.lesson_repo.get_by_id(lesson_id).await?;
        self.comment_repo.find_by_lesson(lesson_id).await
    }

    /// List comments (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_all(limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edura_db::entities::lesson;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_lesson(id: &str) -> lesson::Model {
        lesson::Model {
            id: id.to_string(),
            course_id: None,
            title: "Intro".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_comment(id: &str, user_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            lesson_id: "lesson1".to_string(),
            user_id: user_id.to_string(),
            text: "Great lesson".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> CommentService {
        CommentService::new(CommentRepository::new(db.clone()), LessonRepository::new(db))
    }

    #[tokio::test]
    async fn test_create_on_unknown_lesson() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<lesson::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .create(
                "user1",
                CreateCommentInput {
                    lesson_id: "ghost".to_string(),
                    text: "Hello".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_comment() {
        let comment = create_test_comment("comment1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_lesson("lesson1")]])
                .append_query_results([[comment.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .create(
                "user1",
                CreateCommentInput {
                    lesson_id: "lesson1".to_string(),
                    text: "Great lesson".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.text, "Great lesson");
    }

    #[tokio::test]
    async fn test_delete_foreign_comment_forbidden() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_comment("comment1", "user1")]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service.delete("intruder", "comment1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
