//! Domain models for guild panel configuration.

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};

/// One entry of the category select menu.
///
/// Serialized as JSON into the panel record so the menu can be re-rendered
/// exactly as it was posted, even if the static config has changed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Category key submitted when the entry is selected.
    pub value: String,
    /// Label shown in the menu.
    pub label: String,
    /// Description shown in the menu.
    pub description: String,
    /// Optional emoji shown next to the entry.
    pub emoji: Option<String>,
}

/// Per-guild ticket panel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPanel {
    /// Unique identifier for the panel record.
    pub id: i32,
    /// Discord guild ID (stored as String).
    pub guild_id: String,
    /// Ordered select-menu options as posted with the panel.
    pub options: Vec<CategoryOption>,
}

impl TicketPanel {
    /// Converts an entity model to a panel domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(TicketPanel)` - The converted panel domain model
    /// - `Err(DbErr)` - The stored option list is not valid JSON
    pub fn from_entity(entity: entity::ticket_panel::Model) -> Result<Self, DbErr> {
        let options: Vec<CategoryOption> = serde_json::from_str(&entity.select_menu_options)
            .map_err(|e| DbErr::Custom(format!("Invalid panel options JSON: {}", e)))?;

        Ok(Self {
            id: entity.id,
            guild_id: entity.guild_id,
            options,
        })
    }
}
