//! Staff status repository.

use std::sync::Arc;

use crate::entities::{Status, status};
use edura_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder,
    QuerySelect,
};

/// Repository for staff status labels (active, on leave, retired, ...).
#[derive(Clone)]
pub struct StatusRepository {
    db: Arc<DatabaseConnection>,
}

impl StatusRepository {
    /// Create a new status repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a status by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<status::Model>> {
        Status::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a status by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<status::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("status {id}")))
    }

    /// Create a status.
    pub async fn create(&self, model: status::ActiveModel) -> AppResult<status::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a status.
    pub async fn update(&self, model: status::ActiveModel) -> AppResult<status::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a status. Teacher and moderator rows referencing it are
    /// removed by the cascade.
    pub async fn delete(&self, model: status::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List statuses (paginated).
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<status::Model>> {
        Status::find()
            .order_by_asc(status::Column::Name)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all statuses.
    pub async fn count(&self) -> AppResult<u64> {
        Status::find()
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

    fn create_test_status(id: &str, name: &str) -> status::Model {
        status::Model {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let status = create_test_status("status1", "active");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[status.clone()]])
                .into_connection(),
        );

        let repo = StatusRepository::new(db);
        let result = repo.get_by_id("status1").await.unwrap();

        assert_eq!(result.name, "active");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<status::Model>::new()])
                .into_connection(),
        );

        let repo = StatusRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_status() {
        let status = create_test_status("status1", "active");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[status.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = StatusRepository::new(db);

        let active = status::ActiveModel {
            id: Set("status1".to_string()),
            name: Set("active".to_string()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.name, "active");
    }

    #[tokio::test]
    async fn test_find_all() {
        let s1 = create_test_status("s1", "active");
        let s2 = create_test_status("s2", "retired");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1, s2]])
                .into_connection(),
        );

        let repo = StatusRepository::new(db);
        let result = repo.find_all(10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
