use serenity::all::{
    ActivityData, Command, Context, CreateCommand, Permissions, Ready,
};

/// Handles the ready event when the bot connects to Discord.
///
/// Sets the presence and registers the global slash commands. Registration is
/// idempotent, so reconnects are harmless.
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord!", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("for support tickets")));

    let commands = vec![
        CreateCommand::new("panel")
            .description("Post the ticket panel in this channel")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .dm_permission(false),
        CreateCommand::new("ticketstats")
            .description("Show ticket volume and rating statistics")
            .dm_permission(false),
        CreateCommand::new("configstatus")
            .description("Show the active ticket configuration")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .dm_permission(false),
    ];

    for command in commands {
        if let Err(e) = Command::create_global_command(&ctx.http, command).await {
            tracing::error!("Failed to register slash command: {}", e);
        }
    }
}
