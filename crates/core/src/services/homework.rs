//! Homework service: assignments and submissions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use edura_common::{
    AppError, AppResult, IdGenerator,
    validation::{HOMEWORK_FILE_EXTENSIONS, SUBMISSION_FILE_EXTENSIONS, validate_extension},
};
use edura_db::{
    entities::{homework_submission, lesson_homework},
    repositories::{HomeworkSubmissionRepository, LessonHomeworkRepository, LessonVideoRepository},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

/// Homework service for business logic.
#[derive(Clone)]
pub struct HomeworkService {
    db: Arc<DatabaseConnection>,
    homework_repo: LessonHomeworkRepository,
    submission_repo: HomeworkSubmissionRepository,
    video_repo: LessonVideoRepository,
    id_gen: IdGenerator,
}

/// Input for creating an assignment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHomeworkInput {
    pub lesson_video_id: Option<String>,

    #[validate(length(min = 1))]
    pub homework: String,

    /// Optional attachment; extension restricted to the homework allow-list.
    pub file_url: Option<String>,

    pub deadline: DateTime<Utc>,
}

/// Input for updating an assignment.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHomeworkInput {
    pub lesson_video_id: Option<String>,

    #[validate(length(min = 1))]
    pub homework: Option<String>,

    pub file_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Input for handing in a solution.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitHomeworkInput {
    pub lesson_homework_id: String,

    /// Uploaded work; extension restricted to the submission allow-list.
    #[validate(length(min = 1, max = 1024))]
    pub file_url: String,

    #[validate(length(min = 1))]
    pub description: String,
}

impl HomeworkService {
    /// Create a new homework service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        homework_repo: LessonHomeworkRepository,
        submission_repo: HomeworkSubmissionRepository,
        video_repo: LessonVideoRepository,
    ) -> Self {
        Self {
            db,
            homework_repo,
            submission_repo,
            video_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create an assignment.
    pub async fn create(&self, input: CreateHomeworkInput) -> AppResult<lesson_homework::Model> {
        input.validate()?;

        if let Some(file_url) = &input.file_url {
            validate_extension(file_url, HOMEWORK_FILE_EXTENSIONS)?;
        }

        if let Some(video_id) = &input.lesson_video_id {
            self.video_repo.get_by_id(video_id).await?;
        }

        let model = lesson_homework::ActiveModel {
            id: Set(self.id_gen.generate()),
            lesson_video_id: Set(input.lesson_video_id),
            homework: Set(input.homework),
            file_url: Set(input.file_url),
            deadline: Set(input.deadline.into()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.homework_repo.create(model).await
    }

    /// Update an assignment.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateHomeworkInput,
    ) -> AppResult<lesson_homework::Model> {
        input.validate()?;

        if let Some(file_url) = &input.file_url {
            validate_extension(file_url, HOMEWORK_FILE_EXTENSIONS)?;
        }

        let homework = self.homework_repo.get_by_id(id).await?;

        if let Some(video_id) = &input.lesson_video_id {
            self.video_repo.get_by_id(video_id).await?;
        }

        let mut active: lesson_homework::ActiveModel = homework.into();

        if let Some(video_id) = input.lesson_video_id {
            active.lesson_video_id = Set(Some(video_id));
        }
        if let Some(text) = input.homework {
            active.homework = Set(text);
        }
        if let Some(file_url) = input.file_url {
            active.file_url = Set(Some(file_url));
        }
        if let Some(deadline) = input.deadline {
            active.deadline = Set(deadline.into());
        }

        self.homework_repo.update(active).await
    }

    /// Delete an assignment.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let homework = self.homework_repo.get_by_id(id).await?;
        self.homework_repo.delete(homework).await
    }

    /// Get an assignment by ID.
    pub async fn get(&self, id: &str) -> AppResult<lesson_homework::Model> {
        self.homework_repo.get_by_id(id).await
    }

    /// List assignments (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<lesson_homework::Model>> {
        self.homework_repo.find_all(limit, offset).await
    }

    /// Hand in a solution.
    ///
    /// The deadline check and the insert run in one transaction. A
    /// submission at the deadline instant is still accepted; only strictly
    /// later ones are rejected.
    pub async fn submit(
        &self,
        student_id: &str,
        input: SubmitHomeworkInput,
    ) -> AppResult<homework_submission::Model> {
        input.validate()?;

        validate_extension(&input.file_url, SUBMISSION_FILE_EXTENSIONS)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let homework = self
            .homework_repo
            .get_by_id_on(&txn, &input.lesson_homework_id)
            .await?;

        let now = chrono::Utc::now();
        if now > homework.deadline {
            return Err(AppError::Validation(
                "the submission deadline has passed".to_string(),
            ));
        }

        let model = homework_submission::ActiveModel {
            id: Set(self.id_gen.generate()),
            lesson_homework_id: Set(Some(homework.id)),
            student_id: Set(Some(student_id.to_string())),
            file_url: Set(input.file_url),
            description: Set(input.description),
            created_at: Set(now.into()),
        };

        let submission = self.submission_repo.create_on(&txn, model).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(submission)
    }

    /// Get a submission by ID.
    pub async fn get_submission(&self, id: &str) -> AppResult<homework_submission::Model> {
        self.submission_repo.get_by_id(id).await
    }

    /// List submissions (paginated).
    pub async fn list_submissions(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<homework_submission::Model>> {
        self.submission_repo.find_all(limit, offset).await
    }

    /// List the submissions handed in for an assignment.
    pub async fn submissions_for(
        &self,
        homework_id: &str,
    ) -> AppResult<Vec<homework_submission::Model>> {
        self.homework_repo.get_by_id(homework_id).await?;
        self.submission_repo.find_by_homework(homework_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_homework(id: &str, deadline: DateTime<Utc>) -> lesson_homework::Model {
        lesson_homework::Model {
            id: id.to_string(),
            lesson_video_id: Some("video1".to_string()),
            homework: "Implement a parser".to_string(),
            file_url: None,
            deadline: deadline.into(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_submission(id: &str) -> homework_submission::Model {
        homework_submission::Model {
            id: id.to_string(),
            lesson_homework_id: Some("hw1".to_string()),
            student_id: Some("user1".to_string()),
            file_url: "/files/solution.zip".to_string(),
            description: "Done".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> HomeworkService {
        HomeworkService::new(
            db.clone(),
            LessonHomeworkRepository::new(db.clone()),
            HomeworkSubmissionRepository::new(db.clone()),
            LessonVideoRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_submit_rejects_disallowed_extension() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .submit(
                "user1",
                SubmitHomeworkInput {
                    lesson_homework_id: "hw1".to_string(),
                    file_url: "/files/solution.exe".to_string(),
                    description: "Done".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_after_deadline_rejected() {
        let homework = create_test_homework("hw1", Utc::now() - Duration::hours(1));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[homework]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .submit(
                "user1",
                SubmitHomeworkInput {
                    lesson_homework_id: "hw1".to_string(),
                    file_url: "/files/solution.zip".to_string(),
                    description: "Done".to_string(),
                },
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        match err {
            AppError::Validation(msg) => assert!(msg.contains("deadline")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_before_deadline_accepted() {
        let homework = create_test_homework("hw1", Utc::now() + Duration::days(1));
        let submission = create_test_submission("sub1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[homework]])
                .append_query_results([[submission.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .submit(
                "user1",
                SubmitHomeworkInput {
                    lesson_homework_id: "hw1".to_string(),
                    file_url: "/files/solution.zip".to_string(),
                    description: "Done".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.id, "sub1");
    }

    #[tokio::test]
    async fn test_create_homework_rejects_bad_attachment() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(CreateHomeworkInput {
                lesson_video_id: None,
                homework: "Read chapter 3".to_string(),
                file_url: Some("/files/notes.pdf".to_string()),
                deadline: Utc::now() + Duration::days(7),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
