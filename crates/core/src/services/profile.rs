//! Profile service.

use edura_common::{AppError, AppResult, validation::validate_phone};
use edura_db::{entities::profile, repositories::ProfileRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Profile service for business logic.
#[derive(Clone)]
pub struct ProfileService {
    profile_repo: ProfileRepository,
}

/// Input for updating a profile. All fields optional; absent fields are
/// left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(max = 1024))]
    pub photo_url: Option<String>,

    #[validate(length(max = 256))]
    pub full_name: Option<String>,

    pub phone_number: Option<String>,

    #[validate(length(max = 512))]
    pub address: Option<String>,

    #[validate(length(max = 128))]
    pub telegram: Option<String>,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(profile_repo: ProfileRepository) -> Self {
        Self { profile_repo }
    }

    /// Get a profile by its owning user ID.
    pub async fn get(&self, user_id: &str) -> AppResult<profile::Model> {
        self.profile_repo.get_by_user_id(user_id).await
    }

    /// Update a profile.
    pub async fn update(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<profile::Model> {
        input.validate()?;

        if let Some(phone) = &input.phone_number {
            validate_phone(phone)?;
        }

        let profile = self.profile_repo.get_by_user_id(user_id).await?;
        let mut active: profile::ActiveModel = profile.into();

        if let Some(photo_url) = input.photo_url {
            active.photo_url = Set(Some(photo_url));
        }
        if let Some(full_name) = input.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(phone_number) = input.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(telegram) = input.telegram {
            active.telegram = Set(Some(telegram));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.profile_repo.update(active).await
    }

    /// List profiles (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<profile::Model>> {
        self.profile_repo.find_all(limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_profile(user_id: &str) -> profile::Model {
        profile::Model {
            user_id: user_id.to_string(),
            photo_url: None,
            full_name: None,
            phone_number: None,
            address: None,
            telegram: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_update_rejects_bad_phone() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ProfileService::new(ProfileRepository::new(db));

        let input = UpdateProfileInput {
            photo_url: None,
            full_name: None,
            phone_number: Some("+1234567890".to_string()),
            address: None,
            telegram: None,
        };

        let result = service.update("user1", input).await;
        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Phone number must match +998XXXXXXXXX");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_sets_phone() {
        let existing = create_test_profile("user1");
        let mut updated = existing.clone();
        updated.phone_number = Some("+998901234567".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing], [updated.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = ProfileService::new(ProfileRepository::new(db));

        let input = UpdateProfileInput {
            photo_url: None,
            full_name: None,
            phone_number: Some("+998901234567".to_string()),
            address: None,
            telegram: None,
        };

        let result = service.update("user1", input).await.unwrap();
        assert_eq!(result.phone_number.as_deref(), Some("+998901234567"));
    }

    #[tokio::test]
    async fn test_get_missing_profile() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<profile::Model>::new()])
                .into_connection(),
        );
        let service = ProfileService::new(ProfileRepository::new(db));

        let result = service.get("ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
