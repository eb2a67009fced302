//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_user_table;
mod m20250301_000002_create_profile_table;
mod m20250301_000003_create_status_table;
mod m20250301_000004_create_teacher_table;
mod m20250301_000005_create_moderator_table;
mod m20250301_000006_create_category_table;
mod m20250301_000007_create_course_table;
mod m20250301_000008_create_course_student_table;
mod m20250301_000009_create_lesson_table;
mod m20250301_000010_create_lesson_video_table;
mod m20250301_000011_create_lesson_homework_table;
mod m20250301_000012_create_homework_submission_table;
mod m20250301_000013_create_rating_table;
mod m20250301_000014_create_comment_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_user_table::Migration),
            Box::new(m20250301_000002_create_profile_table::Migration),
            Box::new(m20250301_000003_create_status_table::Migration),
            Box::new(m20250301_000004_create_teacher_table::Migration),
            Box::new(m20250301_000005_create_moderator_table::Migration),
            Box::new(m20250301_000006_create_category_table::Migration),
            Box::new(m20250301_000007_create_course_table::Migration),
            Box::new(m20250301_000008_create_course_student_table::Migration),
            Box::new(m20250301_000009_create_lesson_table::Migration),
            Box::new(m20250301_000010_create_lesson_video_table::Migration),
            Box::new(m20250301_000011_create_lesson_homework_table::Migration),
            Box::new(m20250301_000012_create_homework_submission_table::Migration),
            Box::new(m20250301_000013_create_rating_table::Migration),
            Box::new(m20250301_000014_create_comment_table::Migration),
        ]
    }
}
