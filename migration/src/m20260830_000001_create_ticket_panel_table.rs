use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketPanel::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketPanel::Id))
                    .col(string(TicketPanel::GuildId))
                    .col(text(TicketPanel::SelectMenuOptions))
                    .to_owned(),
            )
            .await?;

        // Create unique index on guild_id
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_panel_guild_id")
                    .table(TicketPanel::Table)
                    .col(TicketPanel::GuildId)
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
                    .name("idx_ticket_panel_guild_id")
                    .table(TicketPanel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TicketPanel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TicketPanel {
    Table,
    Id,
    GuildId,
    SelectMenuOptions,
}
