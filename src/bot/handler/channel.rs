//! Channel event handlers for ticket channels.
//!
//! A ticket channel can be deleted outside the close pipeline (by an
//! administrator, or by Discord itself). Treating channel deletion as the
//! authoritative end of a ticket keeps the records consistent no matter who
//! deleted the channel. The rating record is intentionally left behind so a
//! late rating submission can still land.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildChannel, Message};

use crate::data::ticket::TicketRepository;

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// Removes the ticket record for the channel if one exists. Deleting a
/// channel with no ticket record is a no-op.
///
/// # Arguments
/// - `db` - Database connection for deleting the ticket record
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let channel_id = channel.id.get();
    let repo = TicketRepository::new(db);

    if let Err(e) = repo.delete(channel_id).await {
        tracing::error!(
            "Failed to delete ticket record for channel {}: {}",
            channel_id,
            e
        );
    } else {
        tracing::debug!("Removed ticket record for deleted channel {}", channel_id);
    }
}
