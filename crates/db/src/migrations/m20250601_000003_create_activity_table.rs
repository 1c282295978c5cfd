//! Create `activity` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activity::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activity::UserId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Activity::ActivityType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activity::MovieId).string_len(64))
                    .col(ColumnDef::new(Activity::MovieTitle).string_len(512))
                    .col(ColumnDef::new(Activity::MoviePosterPath).string_len(1024))
                    .col(ColumnDef::new(Activity::Rating).float())
                    .col(ColumnDef::new(Activity::Content).text())
                    .col(ColumnDef::new(Activity::FriendId).string_len(64))
                    .col(
                        ColumnDef::new(Activity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) for per-user and feed queries
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_user_id_created_at")
                    .table(Activity::Table)
                    .col(Activity::UserId)
                    .col(Activity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Activity {
    Table,
    Id,
    UserId,
    ActivityType,
    MovieId,
    MovieTitle,
    MoviePosterPath,
    Rating,
    Content,
    FriendId,
    CreatedAt,
}
