//! Staff services: statuses, teachers, moderators.
//!
//! Teachers and moderators share one generic service over the staff
//! repository; only the entity differs.

use edura_common::{AppError, AppResult, IdGenerator};
use edura_db::{
    entities::{moderator, status, teacher},
    repositories::{ProfileRepository, StaffEntity, StaffModel, StaffRepository, StatusRepository},
};
use sea_orm::{ActiveModelBehavior, IntoActiveModel, PrimaryKeyTrait, Set};
use serde::Deserialize;
use validator::Validate;

/// Status service for staff status labels.
#[derive(Clone)]
pub struct StatusService {
    status_repo: StatusRepository,
    id_gen: IdGenerator,
}

/// Input for creating or renaming a status.
#[derive(Debug, Deserialize, Validate)]
pub struct StatusInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

impl StatusService {
    /// Create a new status service.
    #[must_use]
    pub fn new(status_repo: StatusRepository) -> Self {
        Self {
            status_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a status.
    pub async fn create(&self, input: StatusInput) -> AppResult<status::Model> {
        input.validate()?;

        let model = status::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.status_repo.create(model).await
    }

    /// Rename a status.
    pub async fn update(&self, id: &str, input: StatusInput) -> AppResult<status::Model> {
        input.validate()?;

        let status = self.status_repo.get_by_id(id).await?;
        let mut active: status::ActiveModel = status.into();
        active.name = Set(input.name);

        self.status_repo.update(active).await
    }

    /// Delete a status along with the staff rows holding it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let status = self.status_repo.get_by_id(id).await?;
        self.status_repo.delete(status).await
    }

    /// Get a status by ID.
    pub async fn get(&self, id: &str) -> AppResult<status::Model> {
        self.status_repo.get_by_id(id).await
    }

    /// List statuses (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<status::Model>> {
        self.status_repo.find_all(limit, offset).await
    }
}

/// Input for creating or reassigning a staff row.
#[derive(Debug, Deserialize)]
pub struct StaffInput {
    /// Profile of the person filling the role, if known.
    pub profile_id: Option<String>,
    pub status_id: String,
}

/// Generic service over the teacher and moderator tables.
#[derive(Clone)]
pub struct StaffService<E: StaffEntity>
where
    E::Model: StaffModel,
{
    staff_repo: StaffRepository<E>,
    profile_repo: ProfileRepository,
    status_repo: StatusRepository,
    id_gen: IdGenerator,
}

/// Teacher management.
pub type TeacherService = StaffService<teacher::Entity>;

/// Moderator management.
pub type ModeratorService = StaffService<moderator::Entity>;

impl<E> StaffService<E>
where
    E: StaffEntity,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    /// Create a new staff service.
    #[must_use]
    pub fn new(
        staff_repo: StaffRepository<E>,
        profile_repo: ProfileRepository,
        status_repo: StatusRepository,
    ) -> Self {
        Self {
            staff_repo,
            profile_repo,
            status_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a staff row.
    ///
    /// The referenced profile and status must exist; a profile can hold
    /// the role at most once.
    pub async fn create(&self, input: StaffInput) -> AppResult<E::Model> {
        self.status_repo.get_by_id(&input.status_id).await?;

        if let Some(profile_id) = &input.profile_id {
            self.profile_repo.get_by_user_id(profile_id).await?;

            if self.staff_repo.find_by_profile(profile_id).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "profile {profile_id} already holds the {} role",
                    E::ROLE
                )));
            }
        }

        let model = E::new_row(
            self.id_gen.generate(),
            input.profile_id,
            input.status_id,
            chrono::Utc::now().into(),
        );

        self.staff_repo.insert(model).await
    }

    /// Reassign an existing staff row to a new profile and status.
    pub async fn update(&self, id: &str, input: StaffInput) -> AppResult<E::Model> {
        let existing = self.staff_repo.get_by_id(id).await?;

        self.status_repo.get_by_id(&input.status_id).await?;

        if let Some(profile_id) = &input.profile_id {
            self.profile_repo.get_by_user_id(profile_id).await?;

            if let Some(holder) = self.staff_repo.find_by_profile(profile_id).await?
                && holder.id() != id
            {
                return Err(AppError::Conflict(format!(
                    "profile {profile_id} already holds the {} role",
                    E::ROLE
                )));
            }
        }

        let model = E::reassign(existing, input.profile_id, input.status_id);
        self.staff_repo.update(model).await
    }

    /// Delete a staff row.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.staff_repo.delete_by_id(id).await
    }

    /// Get a staff row by ID.
    pub async fn get(&self, id: &str) -> AppResult<E::Model> {
        self.staff_repo.get_by_id(id).await
    }

    /// List staff rows (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<E::Model>> {
        self.staff_repo.find_all(limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edura_db::entities::profile;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_status(id: &str, name: &str) -> status::Model {
        status::Model {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now().into(),
        }
    }

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

    fn create_test_teacher(id: &str) -> teacher::Model {
        teacher::Model {
            id: id.to_string(),
            profile_id: Some("user1".to_string()),
            status_id: "status1".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn teacher_service(db: Arc<sea_orm::DatabaseConnection>) -> TeacherService {
        TeacherService::new(
            StaffRepository::new(db.clone()),
            ProfileRepository::new(db.clone()),
            StatusRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_teacher_unknown_status() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<status::Model>::new()])
                .into_connection(),
        );
        let service = teacher_service(db);

        let result = service
            .create(StaffInput {
                profile_id: None,
                status_id: "ghost".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_teacher_profile_already_assigned() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_status("status1", "active")]])
                .append_query_results([[create_test_profile("user1")]])
                .append_query_results([[create_test_teacher("teacher1")]])
                .into_connection(),
        );
        let service = teacher_service(db);

        let result = service
            .create(StaffInput {
                profile_id: Some("user1".to_string()),
                status_id: "status1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_teacher_without_profile() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_status("status1", "active")]])
                .append_query_results([[teacher::Model {
                    id: "teacher1".to_string(),
                    profile_id: None,
                    status_id: "status1".to_string(),
                    created_at: Utc::now().into(),
                }]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = teacher_service(db);

        let result = service
            .create(StaffInput {
                profile_id: None,
                status_id: "status1".to_string(),
            })
            .await
            .unwrap();

        assert!(result.profile_id.is_none());
    }

    #[tokio::test]
    async fn test_status_create_validates_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = StatusService::new(StatusRepository::new(db));

        let result = service
            .create(StatusInput {
                name: String::new(),
            })
            .await;

        assert!(result.is_err());
    }
}
