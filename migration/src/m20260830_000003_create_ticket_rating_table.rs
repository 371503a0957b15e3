use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketRating::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketRating::Id))
                    .col(string(TicketRating::ChannelId))
                    .col(integer(TicketRating::Rating))
                    .to_owned(),
            )
            .await?;

        // Create unique index on channel_id
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_rating_channel_id")
                    .table(TicketRating::Table)
                    .col(TicketRating::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_rating_channel_id")
                    .table(TicketRating::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TicketRating::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TicketRating {
    Table,
    Id,
    ChannelId,
    Rating,
}
