//! Create `watchlist_item` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WatchlistItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WatchlistItem::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WatchlistItem::UserId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WatchlistItem::MovieId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WatchlistItem::Title)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WatchlistItem::PosterPath).string_len(1024))
                    .col(ColumnDef::new(WatchlistItem::ReleaseDate).string_len(32))
                    .col(
                        ColumnDef::new(WatchlistItem::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one watchlist entry per movie per user
        manager
            .create_index(
                Index::create()
                    .name("idx_watchlist_item_user_id_movie_id")
                    .table(WatchlistItem::Table)
                    .col(WatchlistItem::UserId)
                    .col(WatchlistItem::MovieId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WatchlistItem::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WatchlistItem {
    Table,
    Id,
    UserId,
    MovieId,
    Title,
    PosterPath,
    ReleaseDate,
    AddedAt,
}
