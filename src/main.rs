mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod util;

use std::sync::Arc;

use crate::{
    config::{Config, TicketConfig},
    error::AppError,
    scheduler::activity_sweep::ActivitySweeper,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let ticket_config = Arc::new(TicketConfig::load(&config.ticket_config_path)?);

    let db = startup::connect_to_database(&config).await?;

    tracing::info!("Starting ticketdesk");

    // Initialize Discord bot and extract HTTP client
    let (client, discord_http) =
        bot::start::init_bot(&config, db.clone(), ticket_config.clone()).await?;

    // Start the idle-ticket sweeper before the bot begins processing events
    let mut sweeper =
        ActivitySweeper::start(db.clone(), discord_http, ticket_config.clone()).await?;

    // Run the bot until shutdown (this blocks)
    let result = bot::start::start_bot(client).await;

    sweeper.shutdown().await?;

    result
}
