use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::model::panel::{CategoryOption, TicketPanel};

/// Repository for guild panel configuration database operations.
///
/// Stores the serialized select-menu option list posted with each guild's
/// ticket panel. The option list is overwritten wholesale on every panel send,
/// never merged.
pub struct TicketPanelRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> TicketPanelRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts the panel configuration for a guild.
    ///
    /// Creates or replaces the guild's panel record. The previous option list,
    /// if any, is discarded entirely.
    ///
    /// # Arguments
    /// - `guild_id` - Discord's unique identifier for the guild
    /// - `options` - Ordered select-menu options as posted with the panel
    ///
    /// # Returns
    /// - `Ok(TicketPanel)` - The created or replaced panel domain model
    /// - `Err(DbErr)` - Database error or option serialization failure
    pub async fn upsert(
        &self,
        guild_id: u64,
        options: &[CategoryOption],
    ) -> Result<TicketPanel, DbErr> {
        let serialized = serde_json::to_string(options)
            .map_err(|e| DbErr::Custom(format!("Failed to serialize panel options: {}", e)))?;

        let entity = entity::prelude::TicketPanel::insert(entity::ticket_panel::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            select_menu_options: ActiveValue::Set(serialized),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::ticket_panel::Column::GuildId)
                .update_columns([entity::ticket_panel::Column::SelectMenuOptions])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        TicketPanel::from_entity(entity)
    }

    /// Retrieves the panel configuration for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord's unique identifier for the guild
    ///
    /// # Returns
    /// - `Ok(Some(TicketPanel))` - The guild's panel configuration
    /// - `Ok(None)` - No panel has been sent in this guild yet
    /// - `Err(DbErr)` - Database error during query or conversion failure
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<TicketPanel>, DbErr> {
        let entity = entity::prelude::TicketPanel::find()
            .filter(entity::ticket_panel::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(TicketPanel::from_entity).transpose()
    }
}

#[cfg(test)]
#[path = "test/panel/mod.rs"]
mod test;
