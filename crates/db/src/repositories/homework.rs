//! Homework assignment and submission repositories.

use std::sync::Arc;

use crate::entities::{
    HomeworkSubmission, LessonHomework, homework_submission, lesson_homework,
};
use edura_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Homework assignment repository.
#[derive(Clone)]
pub struct LessonHomeworkRepository {
    db: Arc<DatabaseConnection>,
}

impl LessonHomeworkRepository {
    /// Create a new homework repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an assignment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<lesson_homework::Model>> {
        LessonHomework::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an assignment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<lesson_homework::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("homework {id}")))
    }

    /// Find an assignment inside an existing transaction or connection.
    ///
    /// The deadline check and the submission insert run on the same
    /// transaction, so the assignment cannot disappear between them.
    pub async fn get_by_id_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<lesson_homework::Model> {
        LessonHomework::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("homework {id}")))
    }

    /// Create an assignment.
    pub async fn create(
        &self,
        model: lesson_homework::ActiveModel,
    ) -> AppResult<lesson_homework::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an assignment.
    pub async fn update(
        &self,
        model: lesson_homework::ActiveModel,
    ) -> AppResult<lesson_homework::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an assignment. Submissions survive with a NULL assignment.
    pub async fn delete(&self, model: lesson_homework::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List assignments (paginated), newest first.
    pub async fn find_all(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<lesson_homework::Model>> {
        LessonHomework::find()
            .order_by_desc(lesson_homework::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the assignments of a video.
    pub async fn find_by_video(&self, video_id: &str) -> AppResult<Vec<lesson_homework::Model>> {
        LessonHomework::find()
            .filter(lesson_homework::Column::LessonVideoId.eq(video_id))
            .order_by_desc(lesson_homework::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Homework submission repository.
#[derive(Clone)]
pub struct HomeworkSubmissionRepository {
    db: Arc<DatabaseConnection>,
}

impl HomeworkSubmissionRepository {
    /// Create a new submission repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a submission by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<homework_submission::Model>> {
        HomeworkSubmission::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a submission by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<homework_submission::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("submission {id}")))
    }

    /// Create a submission inside an existing transaction or connection.
    pub async fn create_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: homework_submission::ActiveModel,
    ) -> AppResult<homework_submission::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a submission.
    pub async fn delete(&self, model: homework_submission::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List submissions (paginated), newest first.
    pub async fn find_all(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<homework_submission::Model>> {
        HomeworkSubmission::find()
            .order_by_desc(homework_submission::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the submissions handed in for an assignment.
    pub async fn find_by_homework(
        &self,
        homework_id: &str,
    ) -> AppResult<Vec<homework_submission::Model>> {
        HomeworkSubmission::find()
            .filter(homework_submission::Column::LessonHomeworkId.eq(homework_id))
            .order_by_desc(homework_submission::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a student's own submissions.
    pub async fn find_by_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<homework_submission::Model>> {
        HomeworkSubmission::find()
            .filter(homework_submission::Column::StudentId.eq(student_id))
            .order_by_desc(homework_submission::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    fn create_test_homework(id: &str) -> lesson_homework::Model {
        lesson_homework::Model {
            id: id.to_string(),
            lesson_video_id: Some("video1".to_string()),
            homework: "Implement a linked list".to_string(),
            file_url: None,
            deadline: (Utc::now() + Duration::days(7)).into(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_submission(id: &str) -> homework_submission::Model {
        homework_submission::Model {
            id: id.to_string(),
            lesson_homework_id: Some("hw1".to_string()),
            student_id: Some("user1".to_string()),
            file_url: "/files/2025/03/01/solution.zip".to_string(),
            description: "My solution".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_homework_get_by_id_found() {
        let homework = create_test_homework("hw1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[homework.clone()]])
                .into_connection(),
        );

        let repo = LessonHomeworkRepository::new(db);
        let result = repo.get_by_id("hw1").await.unwrap();

        assert_eq!(result.homework, "Implement a linked list");
    }

    #[tokio::test]
    async fn test_homework_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<lesson_homework::Model>::new()])
                .into_connection(),
        );

        let repo = LessonHomeworkRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submission_create_on_connection() {
        let submission = create_test_submission("sub1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[submission.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = HomeworkSubmissionRepository::new(db.clone());

        let active = homework_submission::ActiveModel {
            id: Set("sub1".to_string()),
            file_url: Set("/files/2025/03/01/solution.zip".to_string()),
            ..Default::default()
        };

        let result = repo.create_on(db.as_ref(), active).await.unwrap();
        assert_eq!(result.id, "sub1");
    }

    #[tokio::test]
    async fn test_find_by_homework() {
        let s1 = create_test_submission("sub1");
        let s2 = create_test_submission("sub2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1, s2]])
                .into_connection(),
        );

        let repo = HomeworkSubmissionRepository::new(db);
        let result = repo.find_by_homework("hw1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
