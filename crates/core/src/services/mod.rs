//! Service layer.

pub mod category;
pub mod comment;
pub mod course;
pub mod delivery;
pub mod email;
pub mod homework;
pub mod lesson;
pub mod lesson_video;
pub mod profile;
pub mod rating;
pub mod staff;
pub mod user;

pub use category::{CategoryInput, CategoryService};
pub use comment::{CommentService, CreateCommentInput};
pub use course::{CourseService, CourseSummary, CreateCourseInput, UpdateCourseInput};
pub use delivery::{CourseEvent, MailDelivery, MailDeliveryService, NoOpMailDelivery};
pub use email::EmailService;
pub use homework::{CreateHomeworkInput, HomeworkService, SubmitHomeworkInput, UpdateHomeworkInput};
pub use lesson::{CreateLessonInput, LessonService, UpdateLessonInput};
pub use lesson_video::{CreateVideoInput, LessonVideoService, UpdateVideoInput, VideoSummary};
pub use profile::{ProfileService, UpdateProfileInput};
pub use rating::{RateVideoInput, RatingService};
pub use staff::{ModeratorService, StaffInput, StaffService, StatusInput, StatusService, TeacherService};
pub use user::{LoginInput, RegisterInput, UserService, hash_password, verify_password};
