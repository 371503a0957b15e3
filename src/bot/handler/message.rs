use sea_orm::DatabaseConnection;
use serenity::all::{Context, Message};

use crate::data::ticket::TicketRepository;

/// Handles message creation in a channel.
///
/// Every non-bot message in a guild channel refreshes the ticket's activity
/// timestamp. Channels without a ticket record are a silent no-op, so this
/// runs for all guild traffic.
pub async fn handle_message(db: &DatabaseConnection, _ctx: Context, message: Message) {
    // Only ticket channels matter, and those are guild channels
    if message.guild_id.is_none() || message.author.bot {
        return;
    }

    let repo = TicketRepository::new(db);

    if let Err(e) = repo
        .touch_activity(message.channel_id.get(), message.timestamp.to_utc())
        .await
    {
        tracing::error!(
            "Failed to update ticket activity for channel {}: {}",
            message.channel_id,
            e
        );
    }
}
