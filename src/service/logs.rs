//! Log embeds posted to the configured staff log channels.
//!
//! Every lifecycle event (creation, closure, rating) produces one embed in the
//! log channel. Logging is best-effort from the caller's point of view: a
//! failure to post a log must not abort the lifecycle operation, so callers
//! log and swallow errors from this service.

use std::sync::Arc;

use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
};

use crate::{
    config::TicketConfig,
    error::AppError,
    model::ticket::Ticket,
    util::parse::parse_u64_from_string,
};

/// Service for posting staff-facing log embeds.
pub struct LogService<'a> {
    /// Static ticket configuration holding the log channel ids.
    config: &'a TicketConfig,
    /// Discord HTTP client for sending messages.
    http: Arc<Http>,
}

impl<'a> LogService<'a> {
    /// Creates a new LogService instance.
    ///
    /// # Arguments
    /// - `config` - Static ticket configuration
    /// - `http` - Arc-wrapped Discord HTTP client
    pub fn new(config: &'a TicketConfig, http: Arc<Http>) -> Self {
        Self { config, http }
    }

    /// Posts a creation log for a freshly opened ticket.
    ///
    /// # Arguments
    /// - `ticket` - The newly created ticket
    ///
    /// # Returns
    /// - `Ok(())` - Log embed posted
    /// - `Err(AppError)` - Invalid log channel id or Discord API error
    pub async fn log_ticket_creation(&self, ticket: &Ticket) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title("Ticket Created")
            .color(0x2ecc71)
            .field(
                "Creator",
                format!("<@{}> ({})", ticket.creator_id, ticket.creator_name),
                true,
            )
            .field("Category", ticket.category.clone(), true)
            .field("Channel", format!("<#{}>", ticket.channel_id), true)
            .timestamp(Timestamp::now());

        self.send_log(embed).await
    }

    /// Posts a closure log after a ticket channel has been closed.
    ///
    /// When transcripts are enabled a short note pointing at the closed ticket
    /// is additionally posted to the transcript log channel.
    ///
    /// # Arguments
    /// - `ticket` - The ticket being closed
    /// - `closer_id` - Discord user ID of whoever confirmed the close
    /// - `reason` - Collected close reason, or the default placeholder
    ///
    /// # Returns
    /// - `Ok(())` - Log embed(s) posted
    /// - `Err(AppError)` - Invalid log channel id or Discord API error
    pub async fn log_ticket_closure(
        &self,
        ticket: &Ticket,
        closer_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title("Ticket Closed")
            .color(0xe74c3c)
            .field("Closed By", format!("<@{}>", closer_id), true)
            .field(
                "Creator",
                format!("<@{}> ({})", ticket.creator_id, ticket.creator_name),
                true,
            )
            .field("Category", ticket.category.clone(), true)
            .field("Reason", reason.to_string(), false)
            .timestamp(Timestamp::now());

        self.send_log(embed).await?;

        if self.config.enable_transcripts {
            let transcript_channel =
                parse_u64_from_string(self.config.transcript_logs_channel_id.clone())?;

            let note = CreateEmbed::new()
                .title("Transcript")
                .color(0x95a5a6)
                .description(format!(
                    "Transcript for ticket `{}` opened by {} ({}).",
                    ticket.channel_id, ticket.creator_name, ticket.category
                ))
                .timestamp(Timestamp::now());

            ChannelId::new(transcript_channel)
                .send_message(&self.http, CreateMessage::new().embed(note))
                .await?;
        }

        Ok(())
    }

    /// Posts a rating log after a creator rates their closed ticket.
    ///
    /// # Arguments
    /// - `channel_id` - Channel id of the (deleted) ticket channel
    /// - `user_id` - Discord user ID of the rater
    /// - `rating` - Submitted rating 1-5
    ///
    /// # Returns
    /// - `Ok(())` - Log embed posted
    /// - `Err(AppError)` - Invalid log channel id or Discord API error
    pub async fn log_ticket_rating(
        &self,
        channel_id: u64,
        user_id: u64,
        rating: i32,
    ) -> Result<(), AppError> {
        let embed = CreateEmbed::new()
            .title("Ticket Rated")
            .color(0xf1c40f)
            .field("Rated By", format!("<@{}>", user_id), true)
            .field("Ticket", format!("`{}`", channel_id), true)
            .field("Rating", "⭐".repeat(rating.max(0) as usize), true)
            .timestamp(Timestamp::now());

        self.send_log(embed).await
    }

    /// Sends an embed to the main log channel.
    async fn send_log(&self, embed: CreateEmbed) -> Result<(), AppError> {
        let log_channel = parse_u64_from_string(self.config.log_channel_id.clone())?;

        ChannelId::new(log_channel)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }
}
