//! Database entities.

#![allow(missing_docs)]

pub mod category;
pub mod comment;
pub mod course;
pub mod course_student;
pub mod homework_submission;
pub mod lesson;
pub mod lesson_homework;
pub mod lesson_video;
pub mod moderator;
pub mod profile;
pub mod rating;
pub mod status;
pub mod teacher;
pub mod user;

pub use category::Entity as Category;
pub use comment::Entity as Comment;
pub use course::Entity as Course;
pub use course_student::Entity as CourseStudent;
pub use homework_submission::Entity as HomeworkSubmission;
pub use lesson::Entity as Lesson;
pub use lesson_homework::Entity as LessonHomework;
pub use lesson_video::Entity as LessonVideo;
pub use moderator::Entity as Moderator;
pub use profile::Entity as Profile;
pub use rating::Entity as Rating;
pub use status::Entity as Status;
pub use teacher::Entity as Teacher;
pub use user::Entity as User;
