//! Ticket panel posting and category select menu rendering.
//!
//! The panel is the entry point for ticket creation: an embed plus a string
//! select menu listing the configured categories. The option list shown with
//! the menu is persisted per guild so the menu can be re-rendered exactly as
//! posted when a selection needs to be cleared.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ChannelId, CreateActionRow, CreateEmbed, CreateMessage, CreateSelectMenu,
        CreateSelectMenuKind, CreateSelectMenuOption, GuildId, ReactionType,
    },
    http::Http,
};

use crate::{
    config::TicketConfig, data::panel::TicketPanelRepository, error::AppError,
    model::panel::CategoryOption,
};

/// Custom ID of the panel's category select menu.
pub const CATEGORY_MENU_ID: &str = "categoryMenu";

/// Service for posting the ticket panel.
pub struct PanelService<'a> {
    /// Database connection for persisting the posted option list.
    db: &'a DatabaseConnection,
    /// Discord HTTP client for sending messages.
    http: Arc<Http>,
    /// Static ticket configuration providing categories and placeholder text.
    config: Arc<TicketConfig>,
}

impl<'a> PanelService<'a> {
    /// Creates a new PanelService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http` - Arc-wrapped Discord HTTP client
    /// - `config` - Shared static ticket configuration
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>, config: Arc<TicketConfig>) -> Self {
        Self { db, http, config }
    }

    /// Posts the ticket panel to a channel and records its option list.
    ///
    /// The options are derived from the configured categories at the moment of
    /// posting and upserted for the guild, replacing any previously stored
    /// list.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the panel belongs to
    /// - `channel_id` - Channel to post the panel in
    ///
    /// # Returns
    /// - `Ok(())` - Panel posted and option list stored
    /// - `Err(AppError)` - Database or Discord API error
    pub async fn send_panel(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), AppError> {
        let options: Vec<CategoryOption> = self
            .config
            .ticket_categories
            .iter()
            .map(|(key, category)| CategoryOption {
                value: key.clone(),
                label: category.menu_label.clone(),
                description: category.menu_description.clone(),
                emoji: category.menu_emoji.clone(),
            })
            .collect();

        TicketPanelRepository::new(self.db)
            .upsert(guild_id.get(), &options)
            .await?;

        let embed = CreateEmbed::new()
            .title("Support Tickets")
            .description("Select a category below to open a ticket.")
            .color(0x5865f2);

        let menu = build_category_menu(&self.config.menu_placeholder, &options);

        channel_id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(embed)
                    .components(vec![CreateActionRow::SelectMenu(menu)]),
            )
            .await?;

        Ok(())
    }
}

/// Builds the category select menu from a stored or freshly derived option
/// list.
///
/// Also used to re-render the menu after a selection, which is how the panel
/// clears the highlighted entry for the next user.
///
/// # Arguments
/// - `placeholder` - Placeholder text shown before a selection
/// - `options` - Select-menu options in display order
pub fn build_category_menu(placeholder: &str, options: &[CategoryOption]) -> CreateSelectMenu {
    let options = options
        .iter()
        .map(|option| {
            let mut entry = CreateSelectMenuOption::new(&option.label, &option.value)
                .description(&option.description);
            if let Some(emoji) = &option.emoji {
                entry = entry.emoji(ReactionType::Unicode(emoji.clone()));
            }
            entry
        })
        .collect();

    CreateSelectMenu::new(CATEGORY_MENU_ID, CreateSelectMenuKind::String { options })
        .placeholder(placeholder)
}
