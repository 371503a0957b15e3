use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, GuildChannel, Interaction, Message, Ready};
use serenity::async_trait;

use crate::{config::TicketConfig, service::lock::ChannelLocks};

pub mod channel;
pub mod interaction;
pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Arc<TicketConfig>,
    pub locks: ChannelLocks,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Arc<TicketConfig>) -> Self {
        Self {
            db,
            config,
            locks: ChannelLocks::new(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.db, ctx, message).await;
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.db, ctx, channel, messages).await;
    }

    /// Called for slash commands and message component interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(
            &self.db,
            self.config.clone(),
            &self.locks,
            ctx,
            interaction,
        )
        .await;
    }
}
