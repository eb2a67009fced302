//! Category service.

use edura_common::{AppResult, IdGenerator};
use edura_db::{entities::category, repositories::CategoryRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Course category service.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

/// Input for creating or renaming a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub fn new(category_repo: CategoryRepository) -> Self {
        Self {
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a category.
    pub async fn create(&self, input: CategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        let model = category::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.category_repo.create(model).await
    }

    /// Rename a category.
    pub async fn update(&self, id: &str, input: CategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        let category = self.category_repo.get_by_id(id).await?;
        let mut active: category::ActiveModel = category.into();
        active.name = Set(input.name);

        self.category_repo.update(active).await
    }

    /// Delete a category. Its courses keep existing without a category.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let category = self.category_repo.get_by_id(id).await?;
        self.category_repo.delete(category).await
    }

    /// Get a category by ID.
    pub async fn get(&self, id: &str) -> AppResult<category::Model> {
        self.category_repo.get_by_id(id).await
    }

    /// List categories (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<category::Model>> {
        self.category_repo.find_all(limit, offset).await
    }
}
