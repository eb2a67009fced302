//! Create moderator table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Moderator::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moderator::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Moderator::ProfileId).string_len(32))
                    .col(ColumnDef::new(Moderator::StatusId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Moderator::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moderator_profile")
                            .from(Moderator::Table, Moderator::ProfileId)
                            .to(Profile::Table, Profile::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moderator_status")
                            .from(Moderator::Table, Moderator::StatusId)
                            .to(Status::Table, Status::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one moderator row per profile
        manager
            .create_index(
                Index::create()
                    .name("idx_moderator_profile_id")
                    .table(Moderator::Table)
                    .col(Moderator::ProfileId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Moderator::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Moderator {
    Table,
    Id,
    ProfileId,
    StatusId,
    CreatedAt,
}

#[derive(Iden)]
enum Profile {
    Table,
    UserId,
}

#[derive(Iden)]
enum Status {
    Table,
    Id,
}
