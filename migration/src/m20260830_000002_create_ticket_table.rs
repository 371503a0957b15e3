use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::ChannelId))
                    .col(string(Ticket::GuildId))
                    .col(string(Ticket::CreatorId))
                    .col(string(Ticket::CreatorName))
                    .col(string(Ticket::Category))
                    .col(string(Ticket::ControlMessageId))
                    .col(string(Ticket::Status))
                    .col(string_null(Ticket::ClaimedBy))
                    .col(timestamp(Ticket::CreatedAt))
                    .col(timestamp(Ticket::ActivityAt))
                    .col(timestamp_null(Ticket::LastCheckTime))
                    .to_owned(),
            )
            .await?;

        // Create unique index on channel_id
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .col(Ticket::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index creator lookups used by the per-user quota check
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_creator_id")
                    .table(Ticket::Table)
                    .col(Ticket::CreatorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_creator_id")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    Id,
    ChannelId,
    GuildId,
    CreatorId,
    CreatorName,
    Category,
    ControlMessageId,
    Status,
    ClaimedBy,
    CreatedAt,
    ActivityAt,
    LastCheckTime,
}
