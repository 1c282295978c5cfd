//! Create `friend_request` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FriendRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FriendRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::SenderId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::ReceiverId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::PairKey)
                            .string_len(130)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FriendRequest::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: pair_key holds the sorted pair, so both orderings of
        // the same two users collide here - one request per unordered pair
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_request_pair_key")
                    .table(FriendRequest::Table)
                    .col(FriendRequest::PairKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: receiver_id (for listing pending requests)
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_request_receiver_id")
                    .table(FriendRequest::Table)
                    .col(FriendRequest::ReceiverId)
                    .to_owned(),
            )
            .await?;

        // Index: sender_id (for listing sent requests)
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_request_sender_id")
                    .table(FriendRequest::Table)
                    .col(FriendRequest::SenderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FriendRequest::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FriendRequest {
    Table,
    Id,
    SenderId,
    ReceiverId,
    PairKey,
    Status,
    CreatedAt,
    UpdatedAt,
}
