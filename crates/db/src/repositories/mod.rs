//! Repository layer.
//!
//! Thin data-access structs over a shared [`sea_orm::DatabaseConnection`].
//! Repositories translate `DbErr` into `AppError` and keep query logic out
//! of the service layer.

pub mod category;
pub mod comment;
pub mod course;
pub mod homework;
pub mod lesson;
pub mod lesson_video;
pub mod profile;
pub mod rating;
pub mod staff;
pub mod status;
pub mod user;

pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use course::{CourseFilter, CourseRepository};
pub use homework::{HomeworkSubmissionRepository, LessonHomeworkRepository};
pub use lesson::LessonRepository;
pub use lesson_video::LessonVideoRepository;
pub use profile::ProfileRepository;
pub use rating::RatingRepository;
pub use staff::{ModeratorRepository, StaffEntity, StaffModel, StaffRepository, TeacherRepository};
pub use status::StatusRepository;
pub use user::UserRepository;
