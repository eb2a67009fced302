//! Create lesson_video table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LessonVideo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonVideo::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonVideo::LessonId).string_len(32))
                    .col(ColumnDef::new(LessonVideo::Name).string_len(256).not_null())
                    .col(ColumnDef::new(LessonVideo::VideoUrl).string_len(1024).not_null())
                    .col(
                        ColumnDef::new(LessonVideo::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_video_lesson")
                            .from(LessonVideo::Table, LessonVideo::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: lesson_id (counted per course on every course read)
        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_video_lesson_id")
                    .table(LessonVideo::Table)
                    .col(LessonVideo::LessonId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LessonVideo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LessonVideo {
    Table,
    Id,
    LessonId,
    Name,
    VideoUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Lesson {
    Table,
    Id,
}
