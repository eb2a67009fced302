//! Course service.
//!
//! Courses are the unit students enroll in. Creating or updating one
//! queues a notification email to every registered user; the queue is
//! best-effort and never fails the write.

use edura_common::{AppError, AppResult, IdGenerator};
use edura_db::{
    entities::course,
    repositories::{
        CategoryRepository, CourseFilter, CourseRepository, LessonRepository,
        LessonVideoRepository, ModeratorRepository, TeacherRepository, UserRepository,
    },
};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use super::delivery::{CourseEvent, MailDeliveryService};

/// Course service for business logic.
#[derive(Clone)]
pub struct CourseService {
    course_repo: CourseRepository,
    lesson_repo: LessonRepository,
    video_repo: LessonVideoRepository,
    category_repo: CategoryRepository,
    teacher_repo: TeacherRepository,
    moderator_repo: ModeratorRepository,
    user_repo: UserRepository,
    mailer: MailDeliveryService,
    id_gen: IdGenerator,
}

/// Input for creating a course.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub description: Option<String>,

    /// Price per billing period.
    pub price: Decimal,

    /// Length in billing periods.
    #[validate(range(min = 1))]
    pub duration: i32,

    pub category_id: Option<String>,
    pub teacher_id: Option<String>,
    pub moderator_id: Option<String>,
}

/// Input for updating a course. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCourseInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub price: Option<Decimal>,

    #[validate(range(min = 1))]
    pub duration: Option<i32>,

    pub category_id: Option<String>,
    pub teacher_id: Option<String>,
    pub moderator_id: Option<String>,
}

/// A course with its read-time aggregates.
///
/// Counts and the total price are computed fresh on every read; nothing
/// is denormalized into the course row.
#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    #[serde(flatten)]
    pub course: course::Model,
    pub lessons_count: u64,
    pub lesson_videos_count: u64,
    pub students_count: u64,
    pub total_price: Decimal,
}

impl CourseService {
    /// Create a new course service.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        course_repo: CourseRepository,
        lesson_repo: LessonRepository,
        video_repo: LessonVideoRepository,
        category_repo: CategoryRepository,
        teacher_repo: TeacherRepository,
        moderator_repo: ModeratorRepository,
        user_repo: UserRepository,
        mailer: MailDeliveryService,
    ) -> Self {
        Self {
            course_repo,
            lesson_repo,
            video_repo,
            category_repo,
            teacher_repo,
            moderator_repo,
            user_repo,
            mailer,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a course and queue a notification to all users.
    pub async fn create(&self, input: CreateCourseInput) -> AppResult<course::Model> {
        input.validate()?;

        if input.price < Decimal::ZERO {
            return Err(AppError::Validation("price must not be negative".to_string()));
        }

        if self.course_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "course named {:?} already exists",
                input.name
            )));
        }

        self.check_references(
            input.category_id.as_deref(),
            input.teacher_id.as_deref(),
            input.moderator_id.as_deref(),
        )
        .await?;

        let model = course::ActiveModel {
            id: Set(self.id_gen.generate()),
            category_id: Set(input.category_id),
            teacher_id: Set(input.teacher_id),
            moderator_id: Set(input.moderator_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            duration: Set(input.duration),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let course = self.course_repo.create(model).await?;

        self.notify(&course.id, CourseEvent::Created).await;

        Ok(course)
    }

    /// Update a course and queue a notification to all users.
    pub async fn update(&self, id: &str, input: UpdateCourseInput) -> AppResult<course::Model> {
        input.validate()?;

        let existing = self.course_repo.get_by_id(id).await?;

        if let Some(price) = input.price
            && price < Decimal::ZERO
        {
            return Err(AppError::Validation("price must not be negative".to_string()));
        }

        if let Some(name) = &input.name
            && *name != existing.name
            && self.course_repo.find_by_name(name).await?.is_some()
        {
            return Err(AppError::Conflict(format!(
                "course named {name:?} already exists"
            )));
        }

        self.check_references(
            input.category_id.as_deref(),
            input.teacher_id.as_deref(),
            input.moderator_id.as_deref(),
        )
        .await?;

        let mut active: course::ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(duration) = input.duration {
            active.duration = Set(duration);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(Some(category_id));
        }
        if let Some(teacher_id) = input.teacher_id {
            active.teacher_id = Set(Some(teacher_id));
        }
        if let Some(moderator_id) = input.moderator_id {
            active.moderator_id = Set(Some(moderator_id));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let course = self.course_repo.update(active).await?;

        self.notify(&course.id, CourseEvent::Updated).await;

        Ok(course)
    }

    /// Delete a course.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let course = self.course_repo.get_by_id(id).await?;
        self.course_repo.delete(course).await
    }

    /// Get a course with its aggregates.
    pub async fn get(&self, id: &str) -> AppResult<CourseSummary> {
        let course = self.course_repo.get_by_id(id).await?;
        self.summarize(course).await
    }

    /// List courses with their aggregates (filtered and paginated).
    pub async fn list(
        &self,
        filter: &CourseFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<CourseSummary>> {
        let courses = self.course_repo.find_all(filter, limit, offset).await?;

        let mut summaries = Vec::with_capacity(courses.len());
        for course in courses {
            summaries.push(self.summarize(course).await?);
        }
        Ok(summaries)
    }

    /// Replace the enrollment set of a course.
    ///
    /// Every listed user must exist; the replacement is atomic.
    pub async fn set_students(&self, course_id: &str, user_ids: Vec<String>) -> AppResult<()> {
        self.course_repo.get_by_id(course_id).await?;

        for user_id in &user_ids {
            self.user_repo.get_by_id(user_id).await?;
        }

        self.course_repo
            .replace_students(course_id, &user_ids, chrono::Utc::now().into())
            .await
    }

    /// IDs of the students enrolled in a course.
    pub async fn students(&self, course_id: &str) -> AppResult<Vec<String>> {
        self.course_repo.get_by_id(course_id).await?;
        self.course_repo.student_ids(course_id).await
    }

    async fn summarize(&self, course: course::Model) -> AppResult<CourseSummary> {
        let lessons_count = self.lesson_repo.count_by_course(&course.id).await?;
        let lesson_videos_count = self.video_repo.count_by_course(&course.id).await?;
        let students_count = self.course_repo.student_count(&course.id).await?;
        let total_price = course.price * Decimal::from(course.duration);

        Ok(CourseSummary {
            course,
            lessons_count,
            lesson_videos_count,
            students_count,
            total_price,
        })
    }

    async fn check_references(
        &self,
        category_id: Option<&str>,
        teacher_id: Option<&str>,
        moderator_id: Option<&str>,
    ) -> AppResult<()> {
        if let Some(id) = category_id {
            self.category_repo.get_by_id(id).await?;
        }
        if let Some(id) = teacher_id {
            self.teacher_repo.get_by_id(id).await?;
        }
        if let Some(id) = moderator_id {
            self.moderator_repo.get_by_id(id).await?;
        }
        Ok(())
    }

    /// Queue the fan-out email. A queue failure is logged, never returned;
    /// the course write already happened.
    async fn notify(&self, course_id: &str, event: CourseEvent) {
        if let Err(e) = self.mailer.queue_course_notification(course_id, event).await {
            warn!(course_id = %course_id, error = %e, "Failed to queue course notification");
        }
    }
}
