//! Create rating table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rating::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Rating::LessonVideoId).string_len(32).not_null())
                    .col(ColumnDef::new(Rating::UserId).string_len(32))
                    .col(ColumnDef::new(Rating::Score).small_integer().not_null())
                    .col(
                        ColumnDef::new(Rating::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_lesson_video")
                            .from(Rating::Table, Rating::LessonVideoId)
                            .to(LessonVideo::Table, LessonVideo::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_user")
                            .from(Rating::Table, Rating::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (lesson_video_id, user_id) - one rating per user per video
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_video_user")
                    .table(Rating::Table)
                    .col(Rating::LessonVideoId)
                    .col(Rating::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: lesson_video_id (averaged on every video read)
        manager
            .create_index(
                Index::create()
                    .name("idx_rating_lesson_video_id")
                    .table(Rating::Table)
                    .col(Rating::LessonVideoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rating::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rating {
    Table,
    Id,
    LessonVideoId,
    UserId,
    Score,
    CreatedAt,
}

#[derive(Iden)]
enum LessonVideo {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
