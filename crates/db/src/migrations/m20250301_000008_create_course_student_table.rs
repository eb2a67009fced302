//! Create course_student join table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseStudent::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseStudent::CourseId).string_len(32).not_null())
                    .col(ColumnDef::new(CourseStudent::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(CourseStudent::EnrolledAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(CourseStudent::CourseId)
                            .col(CourseStudent::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_student_course")
                            .from(CourseStudent::Table, CourseStudent::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_student_user")
                            .from(CourseStudent::Table, CourseStudent::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a student's courses)
        manager
            .create_index(
                Index::create()
                    .name("idx_course_student_user_id")
                    .table(CourseStudent::Table)
                    .col(CourseStudent::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseStudent::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseStudent {
    Table,
    CourseId,
    UserId,
    EnrolledAt,
}

#[derive(Iden)]
enum Course {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
