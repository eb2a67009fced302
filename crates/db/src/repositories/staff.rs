//! Generic staff repository.
//!
//! Teachers and moderators share the same shape (a profile link plus a
//! status), so both roles are served by one repository generic over the
//! entity. [`StaffEntity`] is the seam: it names the role and builds the
//! active models the repository cannot construct generically.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::entities::{moderator, teacher};
use edura_common::{AppError, AppResult};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Read access to the fields every staff row carries.
pub trait StaffModel {
    /// Row ID.
    fn id(&self) -> &str;
    /// Linked profile, if the profile still exists.
    fn profile_id(&self) -> Option<&str>;
    /// Current status ID.
    fn status_id(&self) -> &str;
}

/// An entity that stores a staff role.
pub trait StaffEntity: EntityTrait
where
    Self::Model: StaffModel,
{
    /// Role name used in error messages ("teacher", "moderator").
    const ROLE: &'static str;

    /// Build an active model for a fresh row.
    fn new_row(
        id: String,
        profile_id: Option<String>,
        status_id: String,
        created_at: DateTimeWithTimeZone,
    ) -> Self::ActiveModel;

    /// Build an active model that moves an existing row to a new profile
    /// and status.
    fn reassign(
        model: Self::Model,
        profile_id: Option<String>,
        status_id: String,
    ) -> Self::ActiveModel;

    /// Column holding the profile FK.
    fn profile_column() -> Self::Column;

    /// Column holding the status FK.
    fn status_column() -> Self::Column;

    /// Column holding the creation timestamp.
    fn created_column() -> Self::Column;
}

impl StaffModel for teacher::Model {
    fn id(&self) -> &str {
        &self.id
    }

    fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }

    fn status_id(&self) -> &str {
        &self.status_id
    }
}

impl StaffEntity for teacher::Entity {
    const ROLE: &'static str = "teacher";

    fn new_row(
        id: String,
        profile_id: Option<String>,
        status_id: String,
        created_at: DateTimeWithTimeZone,
    ) -> Self::ActiveModel {
        teacher::ActiveModel {
            id: Set(id),
            profile_id: Set(profile_id),
            status_id: Set(status_id),
            created_at: Set(created_at),
        }
    }

    fn reassign(
        model: Self::Model,
        profile_id: Option<String>,
        status_id: String,
    ) -> Self::ActiveModel {
        let mut active: teacher::ActiveModel = model.into();
        active.profile_id = Set(profile_id);
        active.status_id = Set(status_id);
        active
    }

    fn profile_column() -> Self::Column {
        teacher::Column::ProfileId
    }

    fn status_column() -> Self::Column {
        teacher::Column::StatusId
    }

    fn created_column() -> Self::Column {
        teacher::Column::CreatedAt
    }
}

impl StaffModel for moderator::Model {
    fn id(&self) -> &str {
        &self.id
    }

    fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }

    fn status_id(&self) -> &str {
        &self.status_id
    }
}

impl StaffEntity for moderator::Entity {
    const ROLE: &'static str = "moderator";

    fn new_row(
        id: String,
        profile_id: Option<String>,
        status_id: String,
        created_at: DateTimeWithTimeZone,
    ) -> Self::ActiveModel {
        moderator::ActiveModel {
            id: Set(id),
            profile_id: Set(profile_id),
            status_id: Set(status_id),
            created_at: Set(created_at),
        }
    }

    fn reassign(
        model: Self::Model,
        profile_id: Option<String>,
        status_id: String,
    ) -> Self::ActiveModel {
        let mut active: moderator::ActiveModel = model.into();
        active.profile_id = Set(profile_id);
        active.status_id = Set(status_id);
        active
    }

    fn profile_column() -> Self::Column {
        moderator::Column::ProfileId
    }

    fn status_column() -> Self::Column {
        moderator::Column::StatusId
    }

    fn created_column() -> Self::Column {
        moderator::Column::CreatedAt
    }
}

/// Repository shared by the teacher and moderator tables.
#[derive(Clone)]
pub struct StaffRepository<E: StaffEntity>
where
    E::Model: StaffModel,
{
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<E>,
}

/// Teacher table access.
pub type TeacherRepository = StaffRepository<teacher::Entity>;

/// Moderator table access.
pub type ModeratorRepository = StaffRepository<moderator::Entity>;

impl<E> StaffRepository<E>
where
    E: StaffEntity,
    E::Model: StaffModel + IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Find a staff row by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<E::Model>> {
        E::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a staff row by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<E::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {id}", E::ROLE)))
    }

    /// Find the staff row linked to a profile, if any.
    pub async fn find_by_profile(&self, profile_id: &str) -> AppResult<Option<E::Model>> {
        E::find()
            .filter(E::profile_column().eq(profile_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List staff rows with a given status.
    pub async fn find_by_status(&self, status_id: &str) -> AppResult<Vec<E::Model>> {
        E::find()
            .filter(E::status_column().eq(status_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List staff rows (paginated), newest first.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<E::Model>> {
        E::find()
            .order_by_desc(E::created_column())
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all staff rows.
    pub async fn count(&self) -> AppResult<u64> {
        E::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a staff row.
    pub async fn insert(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a staff row.
    pub async fn update(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a staff row by ID.
    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let result = E::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("{} {id}", E::ROLE)));
        }
        Ok(())
    }
}
