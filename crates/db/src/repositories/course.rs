//! Course repository, including enrollment rows.

use std::sync::Arc;

use crate::entities::{Course, CourseStudent, course, course_student};
use edura_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Optional filters for course listings.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Substring match on the course name.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category_id: Option<String>,
}

/// Course repository for database operations.
#[derive(Clone)]
pub struct CourseRepository {
    db: Arc<DatabaseConnection>,
}

impl CourseRepository {
    /// Create a new course repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a course by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<course::Model>> {
        Course::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a course by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<course::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::CourseNotFound(id.to_string()))
    }

    /// Find a course by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<course::Model>> {
        Course::find()
            .filter(course::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a course.
    pub async fn create(&self, model: course::ActiveModel) -> AppResult<course::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a course.
    pub async fn update(&self, model: course::ActiveModel) -> AppResult<course::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a course. Enrollment rows are removed by the cascade;
    /// lessons survive with a NULL course.
    pub async fn delete(&self, model: course::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List courses matching the filter (paginated), newest first.
    pub async fn find_all(
        &self,
        filter: &CourseFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<course::Model>> {
        let mut query = Course::find();

        if let Some(search) = &filter.search {
            query = query.filter(course::Column::Name.contains(search));
        }
        if let Some(category_id) = &filter.category_id {
            query = query.filter(course::Column::CategoryId.eq(category_id));
        }

        query
            .order_by_desc(course::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all courses.
    pub async fn count(&self) -> AppResult<u64> {
        Course::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// IDs of the students enrolled in a course.
    pub async fn student_ids(&self, course_id: &str) -> AppResult<Vec<String>> {
        CourseStudent::find()
            .filter(course_student::Column::CourseId.eq(course_id))
            .select_only()
            .column(course_student::Column::UserId)
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count enrolled students.
    pub async fn student_count(&self, course_id: &str) -> AppResult<u64> {
        CourseStudent::find()
            .filter(course_student::Column::CourseId.eq(course_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace the enrollment set of a course atomically.
    ///
    /// The old rows are cleared and the new set inserted in one transaction,
    /// so a concurrent read never sees a half-applied roster.
    pub async fn replace_students(
        &self,
        course_id: &str,
        user_ids: &[String],
        enrolled_at: sea_orm::entity::prelude::DateTimeWithTimeZone,
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        CourseStudent::delete_many()
            .filter(course_student::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !user_ids.is_empty() {
            let rows: Vec<course_student::ActiveModel> = user_ids
                .iter()
                .map(|user_id| course_student::ActiveModel {
                    course_id: Set(course_id.to_string()),
                    user_id: Set(user_id.clone()),
                    enrolled_at: Set(enrolled_at),
                })
                .collect();

            CourseStudent::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_course(id: &str, name: &str) -> course::Model {
        course::Model {
            id: id.to_string(),
            category_id: Some("cat1".to_string()),
            teacher_id: Some("teacher1".to_string()),
            moderator_id: None,
            name: name.to_string(),
            description: Some("A course".to_string()),
            price: Decimal::new(9999, 2),
            duration: 6,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let course = create_test_course("course1", "Rust Basics");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course.clone()]])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.get_by_id("course1").await.unwrap();

        assert_eq!(result.name, "Rust Basics");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::CourseNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected CourseNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let course = create_test_course("course1", "Rust Basics");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course.clone()]])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let result = repo.find_by_name("Rust Basics").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "course1");
    }

    #[tokio::test]
    async fn test_find_all_applies_filters() {
        let course = create_test_course("course1", "Rust Basics");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course]])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let filter = CourseFilter {
            search: Some("Rust".to_string()),
            category_id: Some("cat1".to_string()),
        };
        let result = repo.find_all(&filter, 20, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Rust Basics");
    }

    #[tokio::test]
    async fn test_replace_students_clears_then_inserts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 2,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 3,
                    },
                ])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        let students = vec![
            "user1".to_string(),
            "user2".to_string(),
            "user3".to_string(),
        ];

        repo.replace_students("course1", &students, Utc::now().into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_replace_students_with_empty_roster() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                }])
                .into_connection(),
        );

        let repo = CourseRepository::new(db);
        repo.replace_students("course1", &[], Utc::now().into())
            .await
            .unwrap();
    }
}
