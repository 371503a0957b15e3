use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};

use crate::{
    bot::handler::Handler,
    config::{Config, TicketConfig},
    error::AppError,
};

/// Initializes the Discord bot client.
///
/// Builds the client without starting it, returning a handle to its HTTP
/// client so background jobs (the activity sweeper) can act on Discord with
/// the bot's identity before the gateway connection is up.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `db` - Database connection for the event handlers
/// - `ticket_config` - Shared static ticket configuration
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - The built client and its HTTP handle
/// - `Err(AppError)` - Client construction failure
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    ticket_config: Arc<TicketConfig>,
) -> Result<(Client, Arc<Http>), AppError> {
    // MESSAGE_CONTENT is a privileged intent - must be enabled in the Discord
    // Developer Portal. It is required for close reason collection.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(db, ticket_config);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Starts the Discord bot in a blocking manner.
///
/// Blocks until the bot shuts down.
///
/// # Arguments
/// - `client` - The client built by `init_bot`
///
/// # Returns
/// - `Ok(())` - The bot ran and shut down cleanly
/// - `Err(AppError)` - Gateway connection failure
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
