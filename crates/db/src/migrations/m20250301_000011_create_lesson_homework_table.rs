//! Create lesson_homework table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LessonHomework::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonHomework::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonHomework::LessonVideoId).string_len(32))
                    .col(ColumnDef::new(LessonHomework::Homework).text().not_null())
                    .col(ColumnDef::new(LessonHomework::FileUrl).string_len(1024))
                    .col(
                        ColumnDef::new(LessonHomework::Deadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonHomework::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_homework_video")
                            .from(LessonHomework::Table, LessonHomework::LessonVideoId)
                            .to(LessonVideo::Table, LessonVideo::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LessonHomework::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LessonHomework {
    Table,
    Id,
    LessonVideoId,
    Homework,
    FileUrl,
    Deadline,
    CreatedAt,
}

#[derive(Iden)]
enum LessonVideo {
    Table,
    Id,
}
