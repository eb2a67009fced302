//! Rating repository.

use std::sync::Arc;

use crate::entities::{Rating, rating};
use edura_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

/// Rating repository for database operations.
#[derive(Clone)]
pub struct RatingRepository {
    db: Arc<DatabaseConnection>,
}

impl RatingRepository {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a rating by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<rating::Model>> {
        Rating::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a rating by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<rating::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("rating {id}")))
    }

    /// Find the rating a user gave a video, if any.
    pub async fn find_by_video_and_user(
        &self,
        video_id: &str,
        user_id: &str,
    ) -> AppResult<Option<rating::Model>> {
        Rating::find()
            .filter(rating::Column::LessonVideoId.eq(video_id))
            .filter(rating::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a rating.
    ///
    /// The schema enforces one rating per (video, user); a unique-constraint
    /// violation from a concurrent insert surfaces as a conflict.
    pub async fn create(&self, model: rating::ActiveModel) -> AppResult<rating::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("video already rated by this user".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a rating.
    pub async fn delete(&self, model: rating::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All scores given to a video. Averaged fresh on every video read.
    pub async fn scores_for_video(&self, video_id: &str) -> AppResult<Vec<i16>> {
        Rating::find()
            .filter(rating::Column::LessonVideoId.eq(video_id))
            .select_only()
            .column(rating::Column::Score)
            .into_tuple::<i16>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count the ratings of a video.
    pub async fn count_for_video(&self, video_id: &str) -> AppResult<u64> {
        Rating::find()
            .filter(rating::Column::LessonVideoId.eq(video_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List ratings (paginated), newest first.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<rating::Model>> {
        Rating::find()
            .order_by_desc(rating::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
