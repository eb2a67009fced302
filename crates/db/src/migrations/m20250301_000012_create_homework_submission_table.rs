//! Create homework_submission table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HomeworkSubmission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HomeworkSubmission::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HomeworkSubmission::LessonHomeworkId).string_len(32))
                    .col(ColumnDef::new(HomeworkSubmission::StudentId).string_len(32))
                    .col(
                        ColumnDef::new(HomeworkSubmission::FileUrl)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HomeworkSubmission::Description).text().not_null())
                    .col(
                        ColumnDef::new(HomeworkSubmission::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_homework_submission_homework")
                            .from(
                                HomeworkSubmission::Table,
                                HomeworkSubmission::LessonHomeworkId,
                            )
                            .to(LessonHomework::Table, LessonHomework::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_homework_submission_student")
                            .from(HomeworkSubmission::Table, HomeworkSubmission::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: lesson_homework_id (for listing submissions per assignment)
        manager
            .create_index(
                Index::create()
                    .name("idx_homework_submission_homework_id")
                    .table(HomeworkSubmission::Table)
                    .col(HomeworkSubmission::LessonHomeworkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HomeworkSubmission::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HomeworkSubmission {
    Table,
    Id,
    LessonHomeworkId,
    StudentId,
    FileUrl,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum LessonHomework {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
