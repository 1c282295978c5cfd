//! Create `user` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::ExternalId).string_len(64).not_null())
                    .col(ColumnDef::new(User::FirstName).string_len(256).not_null())
                    .col(ColumnDef::new(User::LastName).string_len(256).not_null())
                    .col(ColumnDef::new(User::Email).string_len(320).not_null())
                    .col(
                        ColumnDef::new(User::ProfilePicture)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(User::Friends)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(User::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: external_id - the identity-provider correlation key
        manager
            .create_index(
                Index::create()
                    .name("idx_user_external_id")
                    .table(User::Table)
                    .col(User::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    ExternalId,
    FirstName,
    LastName,
    Email,
    ProfilePicture,
    Friends,
    CreatedAt,
    UpdatedAt,
}
