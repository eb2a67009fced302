//! Create teacher table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teacher::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Teacher::ProfileId).string_len(32))
                    .col(ColumnDef::new(Teacher::StatusId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Teacher::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_profile")
                            .from(Teacher::Table, Teacher::ProfileId)
                            .to(Profile::Table, Profile::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_status")
                            .from(Teacher::Table, Teacher::StatusId)
                            .to(Status::Table, Status::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one teacher row per profile
        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_profile_id")
                    .table(Teacher::Table)
                    .col(Teacher::ProfileId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Teacher {
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
