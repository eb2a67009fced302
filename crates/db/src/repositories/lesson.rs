//! Lesson repository.

use std::sync::Arc;

use crate::entities::{Lesson, lesson};
use edura_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Lesson repository for database operations.
#[derive(Clone)]
pub struct LessonRepository {
    db: Arc<DatabaseConnection>,
}

impl LessonRepository {
    /// Create a new lesson repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a lesson by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<lesson::Model>> {
        Lesson::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a lesson by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<lesson::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("lesson {id}")))
    }

    /// Create a lesson.
    pub async fn create(&self, model: lesson::ActiveModel) -> AppResult<lesson::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a lesson.
    pub async fn update(&self, model: lesson::ActiveModel) -> AppResult<lesson::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a lesson. Videos under it survive with a NULL lesson;
    /// comments are removed by the cascade.
    pub async fn delete(&self, model: lesson::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List lessons (paginated), oldest first to preserve course order.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<lesson::Model>> {
        Lesson::find()
            .order_by_asc(lesson::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the lessons of a course, oldest first.
    pub async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<lesson::Model>> {
        Lesson::find()
            .filter(lesson::Column::CourseId.eq(course_id))
            .order_by_asc(lesson::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count the lessons of a course. Computed fresh on every course read.
    pub async fn count_by_course(&self, course_id: &str) -> AppResult<u64> {
        Lesson::find()
            .filter(lesson::Column::CourseId.eq(course_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
