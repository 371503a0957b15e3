//! Interaction router for slash commands and message components.
//!
//! Interactions are dispatched on a closed custom-ID set; anything else is
//! ignored. All permission and state validation happens in the lifecycle
//! service, so the router only shapes requests and responses. Domain denials
//! are replied to the acting user ephemerally and not logged as errors;
//! operational failures are logged and reported generically.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, CommandInteraction, ComponentInteraction, ComponentInteractionDataKind, Context,
    CreateActionRow, CreateButton, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, EditInteractionResponse,
    EditMessage, GuildId, Interaction, Timestamp,
};

use crate::{
    config::{CleanupMode, TicketConfig},
    data::{panel::TicketPanelRepository, rating::TicketRatingRepository},
    error::AppError,
    service::{
        lifecycle::{
            TicketLifecycleService, CLAIM_BUTTON_ID, CLOSE_BUTTON_ID, CONFIRM_CLOSE_BUTTON_ID,
            TRANSCRIPT_BUTTON_ID, UNCLAIM_BUTTON_ID,
        },
        lock::ChannelLocks,
        panel::{build_category_menu, PanelService, CATEGORY_MENU_ID},
    },
    util::parse::parse_rating_menu_id,
};

/// Seconds before the ephemeral close confirmation is withdrawn.
const CONFIRM_TIMEOUT_SECS: u64 = 60;

/// Generic reply for failures that are not the user's fault.
const GENERIC_FAILURE: &str = "Something went wrong handling that action. Please try again later.";

/// Handles the interaction_create event.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Shared static ticket configuration
/// - `locks` - Per-channel advisory locks
/// - `ctx` - Discord context
/// - `interaction` - The incoming interaction
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    locks: &ChannelLocks,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(command) => handle_command(db, config, &ctx, command).await,
        Interaction::Component(component) => {
            handle_component(db, config, locks, &ctx, component).await
        }
        _ => {}
    }
}

/// Dispatches a slash command.
async fn handle_command(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    ctx: &Context,
    command: CommandInteraction,
) {
    match command.data.name.as_str() {
        "panel" => handle_panel_command(db, config, ctx, &command).await,
        "ticketstats" => handle_ticketstats_command(db, ctx, &command).await,
        "configstatus" => handle_configstatus_command(&config, ctx, &command).await,
        _ => {}
    }
}

/// Posts the ticket panel in the invoking channel.
async fn handle_panel_command(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    ctx: &Context,
    command: &CommandInteraction,
) {
    let Some(guild_id) = command.guild_id else {
        return;
    };

    // Registration already gates on MANAGE_GUILD; re-check in case the
    // command permissions were edited server-side
    let authorized = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map(|permissions| permissions.manage_guild())
        .unwrap_or(false);

    if !authorized {
        reply_command(ctx, command, "You do not have permission to do that.").await;
        return;
    }

    let service = PanelService::new(db, ctx.http.clone(), config);

    match service.send_panel(guild_id, command.channel_id).await {
        Ok(()) => reply_command(ctx, command, "Ticket panel posted.").await,
        Err(e) => {
            tracing::error!("Failed to post ticket panel in {}: {}", guild_id, e);
            reply_command(ctx, command, GENERIC_FAILURE).await;
        }
    }
}

/// Replies with aggregate ticket and rating statistics.
async fn handle_ticketstats_command(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) {
    let stats = match TicketRatingRepository::new(db).stats().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Failed to aggregate ticket statistics: {}", e);
            reply_command(ctx, command, GENERIC_FAILURE).await;
            return;
        }
    };

    let average = match stats.average() {
        Some(average) => format!("{:.2} ⭐", average),
        None => "N/A".to_string(),
    };

    let embed = CreateEmbed::new()
        .title("Ticket Statistics")
        .color(0x5865f2)
        .field("Total Tickets", stats.total_tickets.to_string(), true)
        .field("Total Ratings", stats.rated.to_string(), true)
        .field("Average Rating", average, true)
        .timestamp(Timestamp::now());

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().embed(embed),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to ticketstats: {}", e);
    }
}

/// Replies with the active ticket configuration for guild managers.
async fn handle_configstatus_command(
    config: &TicketConfig,
    ctx: &Context,
    command: &CommandInteraction,
) {
    let authorized = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .map(|permissions| permissions.manage_guild())
        .unwrap_or(false);

    if !authorized {
        reply_command(ctx, command, "You do not have permission to do that.").await;
        return;
    }

    let embed = config_status_embed(config);

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .ephemeral(true)
            .embed(embed),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to configstatus: {}", e);
    }
}

/// Renders the active ticket configuration as an embed.
fn config_status_embed(config: &TicketConfig) -> CreateEmbed {
    let toggle = |enabled: bool| if enabled { "Enabled" } else { "Disabled" };

    let support_roles = if config.support_roles.is_empty() {
        "None".to_string()
    } else {
        config
            .support_roles
            .iter()
            .map(|role| format!("<@&{}>", role))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let categories = config
        .ticket_categories
        .values()
        .map(|category| category.menu_label.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let cleanup = match config.cleanup_mode {
        CleanupMode::BestEffort => "best-effort",
        CleanupMode::Verified => "verified",
    };

    CreateEmbed::new()
        .title("Ticket Configuration")
        .color(0x5865f2)
        .field("Support Roles", support_roles, false)
        .field("Categories", categories, false)
        .field(
            "Max Tickets Per User",
            config.max_active_tickets_per_user.to_string(),
            true,
        )
        .field(
            "Claim Button",
            toggle(config.enable_claim_button),
            true,
        )
        .field(
            "Staff-Only Close",
            toggle(config.close_ticket_staff_only),
            true,
        )
        .field(
            "Close Reason",
            toggle(config.enable_ticket_reason),
            true,
        )
        .field(
            "Creator Notification",
            toggle(config.enable_notify_ticket_creator),
            true,
        )
        .field(
            "Transcripts",
            toggle(config.enable_transcripts),
            true,
        )
        .field(
            "Activity Check",
            format!(
                "{} ({} min)",
                toggle(config.enable_ticket_activity_check),
                config.ticket_activity_check_interval
            ),
            true,
        )
        .field("Cleanup Mode", cleanup, true)
        .timestamp(Timestamp::now())
}

/// Dispatches a message component interaction on the closed custom-ID set.
async fn handle_component(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    locks: &ChannelLocks,
    ctx: &Context,
    component: ComponentInteraction,
) {
    let custom_id = component.data.custom_id.as_str();

    if custom_id == CATEGORY_MENU_ID {
        handle_category_select(db, config, ctx, component).await;
    } else if custom_id == CLOSE_BUTTON_ID {
        handle_close_request(db, config, ctx, component).await;
    } else if custom_id == CONFIRM_CLOSE_BUTTON_ID {
        handle_close_confirm(db, config, locks, ctx, component).await;
    } else if custom_id == CLAIM_BUTTON_ID || custom_id == UNCLAIM_BUTTON_ID {
        handle_claim(db, config, ctx, component).await;
    } else if custom_id == TRANSCRIPT_BUTTON_ID {
        reply_component(
            ctx,
            &component,
            "A transcript note will be posted to the transcript channel when this ticket closes.",
        )
        .await;
    } else if let Some(ticket_channel_id) = parse_rating_menu_id(custom_id) {
        handle_rating_select(db, config, ctx, component, ticket_channel_id).await;
    }
}

/// Handles a category selection on the ticket panel.
///
/// The response is deferred because channel creation spans several API calls;
/// the deferral also lets the panel menu be re-rendered immediately so the
/// highlighted selection clears for the next user.
async fn handle_category_select(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    ctx: &Context,
    component: ComponentInteraction,
) {
    let Some(guild_id) = component.guild_id else {
        return;
    };

    let ComponentInteractionDataKind::StringSelect { values } = &component.data.kind else {
        return;
    };
    let Some(selected) = values.first().cloned() else {
        return;
    };

    let deferral = CreateInteractionResponse::Defer(
        CreateInteractionResponseMessage::new().ephemeral(true),
    );
    if let Err(e) = component.create_response(&ctx.http, deferral).await {
        tracing::error!("Failed to defer category selection: {}", e);
        return;
    }

    if let Err(e) = rerender_panel_menu(db, &config, ctx, &component, guild_id).await {
        tracing::warn!("Failed to re-render panel menu in {}: {}", guild_id, e);
    }

    let service = TicketLifecycleService::new(db, ctx.http.clone(), config);

    let content = match service
        .create_ticket(guild_id, &component.user, &selected)
        .await
    {
        Ok(ticket) => format!("Your ticket has been created: <#{}>", ticket.channel_id),
        Err(e) => match e.user_message() {
            Some(message) => message,
            None => {
                tracing::error!("Failed to create ticket in {}: {}", guild_id, e);
                GENERIC_FAILURE.to_string()
            }
        },
    };

    if let Err(e) = component
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::error!("Failed to edit category selection response: {}", e);
    }
}

/// Re-posts the panel's select menu so the previous selection clears.
async fn rerender_panel_menu(
    db: &DatabaseConnection,
    config: &TicketConfig,
    ctx: &Context,
    component: &ComponentInteraction,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let Some(panel) = TicketPanelRepository::new(db)
        .find_by_guild_id(guild_id.get())
        .await?
    else {
        return Ok(());
    };

    let menu = build_category_menu(&config.menu_placeholder, &panel.options);

    let mut message = (*component.message).clone();
    message
        .edit(
            &ctx.http,
            EditMessage::new().components(vec![CreateActionRow::SelectMenu(menu)]),
        )
        .await?;

    Ok(())
}

/// Handles the close button: shows the ephemeral close confirmation.
///
/// The confirmation does not hold the channel lock; the lock is only taken
/// when the close is confirmed, so a pending confirmation cannot block other
/// ticket actions. The confirmation withdraws itself after a minute.
async fn handle_close_request(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    ctx: &Context,
    component: ComponentInteraction,
) {
    let Some(member) = component.member.as_ref() else {
        return;
    };

    let service = TicketLifecycleService::new(db, ctx.http.clone(), config.clone());

    if let Err(e) = service
        .authorize_close(component.channel_id.get(), component.user.id, &member.roles)
        .await
    {
        report_component_error(ctx, &component, e).await;
        return;
    }

    let mut buttons = vec![CreateButton::new(CONFIRM_CLOSE_BUTTON_ID)
        .label("Close Ticket")
        .style(ButtonStyle::Danger)];

    if config.enable_transcripts {
        buttons.push(
            CreateButton::new(TRANSCRIPT_BUTTON_ID)
                .label("Transcript")
                .style(ButtonStyle::Secondary),
        );
    }

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .ephemeral(true)
            .content("Are you sure you want to close this ticket?")
            .components(vec![CreateActionRow::Buttons(buttons)]),
    );

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to send close confirmation: {}", e);
        return;
    }

    // Withdraw the confirmation if it sits unanswered
    let http = ctx.http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(CONFIRM_TIMEOUT_SECS)).await;
        let _ = component.delete_response(&http).await;
    });
}

/// Handles the confirm button: runs the close pipeline.
async fn handle_close_confirm(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    locks: &ChannelLocks,
    ctx: &Context,
    component: ComponentInteraction,
) {
    let Some(member) = component.member.as_ref() else {
        return;
    };

    // Acknowledge before the pipeline starts; reason collection alone can
    // take a minute
    let ack = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .ephemeral(true)
            .content("Closing this ticket."),
    );
    if let Err(e) = component.create_response(&ctx.http, ack).await {
        tracing::error!("Failed to acknowledge close confirmation: {}", e);
        return;
    }

    let service = TicketLifecycleService::new(db, ctx.http.clone(), config);

    if let Err(e) = service
        .confirm_close(
            &ctx.shard,
            component.channel_id,
            &component.user,
            &member.roles,
            locks,
        )
        .await
    {
        let content = match e.user_message() {
            Some(message) => message,
            None => {
                tracing::error!(
                    "Failed to close ticket {}: {}",
                    component.channel_id,
                    e
                );
                GENERIC_FAILURE.to_string()
            }
        };

        let followup = CreateInteractionResponseFollowup::new()
            .ephemeral(true)
            .content(content);
        let _ = component.create_followup(&ctx.http, followup).await;
    }
}

/// Handles the claim and unclaim buttons.
async fn handle_claim(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    ctx: &Context,
    component: ComponentInteraction,
) {
    let Some(member) = component.member.as_ref() else {
        return;
    };

    let claiming = component.data.custom_id == CLAIM_BUTTON_ID;
    let service = TicketLifecycleService::new(db, ctx.http.clone(), config);

    let result = if claiming {
        service.claim(component.channel_id, member).await
    } else {
        service.unclaim(component.channel_id, member).await
    };

    match result {
        Ok(()) => {
            let content = if claiming {
                "You claimed this ticket."
            } else {
                "You released this ticket."
            };
            reply_component(ctx, &component, content).await;
        }
        Err(e) => report_component_error(ctx, &component, e).await,
    }
}

/// Handles a rating selection from the post-close DM prompt.
async fn handle_rating_select(
    db: &DatabaseConnection,
    config: Arc<TicketConfig>,
    ctx: &Context,
    component: ComponentInteraction,
    ticket_channel_id: u64,
) {
    let ComponentInteractionDataKind::StringSelect { values } = &component.data.kind else {
        return;
    };
    let Some(selected) = values.first().cloned() else {
        return;
    };

    let service = TicketLifecycleService::new(db, ctx.http.clone(), config);

    match service
        .submit_rating(ticket_channel_id, component.user.id, &selected)
        .await
    {
        Ok(rating) => {
            reply_component(
                ctx,
                &component,
                &format!(
                    "Thank you! You rated your support experience {}/5.",
                    rating
                ),
            )
            .await;
        }
        Err(e) => report_component_error(ctx, &component, e).await,
    }
}

/// Replies ephemerally to a slash command, falling back to a followup.
async fn reply_command(ctx: &Context, command: &CommandInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .ephemeral(true)
            .content(content),
    );

    if command.create_response(&ctx.http, response).await.is_err() {
        let followup = CreateInteractionResponseFollowup::new()
            .ephemeral(true)
            .content(content);
        if let Err(e) = command.create_followup(&ctx.http, followup).await {
            tracing::error!("Failed to reply to {} command: {}", command.data.name, e);
        }
    }
}

/// Replies ephemerally to a component interaction, falling back to a followup.
async fn reply_component(ctx: &Context, component: &ComponentInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .ephemeral(true)
            .content(content),
    );

    if component.create_response(&ctx.http, response).await.is_err() {
        let followup = CreateInteractionResponseFollowup::new()
            .ephemeral(true)
            .content(content);
        if let Err(e) = component.create_followup(&ctx.http, followup).await {
            tracing::error!(
                "Failed to reply to component {}: {}",
                component.data.custom_id,
                e
            );
        }
    }
}

/// Reports a lifecycle failure on a component interaction.
///
/// Domain denials carry their own user-facing message and are not logged as
/// errors; anything else is logged and reported generically.
async fn report_component_error(ctx: &Context, component: &ComponentInteraction, err: AppError) {
    let content = match err.user_message() {
        Some(message) => message,
        None => {
            tracing::error!(
                "Interaction {} on {} failed: {}",
                component.data.custom_id,
                component.channel_id,
                err
            );
            GENERIC_FAILURE.to_string()
        }
    };

    reply_component(ctx, component, &content).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
supportRoles:
  - "111111111111111111"
ticketCategoryId: "222222222222222222"
maxActiveTicketsPerUser: 2
menuPlaceholder: "Select a category"
enableClaimButton: true
closeTicketStaffOnly: false
enableTicketReason: true
enableNotifyTicketCreator: true
enableTranscripts: false
enableTicketActivityCheck: true
ticketActivityCheckInterval: 30
logChannelId: "333333333333333333"
transcriptLogsChannelId: "444444444444444444"
ticketCategories:
  billing:
    menuLabel: "Billing"
    menuDescription: "Billing questions"
    embedDescription: "A staff member will assist you with billing shortly."
  support:
    menuLabel: "Support"
    menuDescription: "General support"
    embedDescription: "Describe your issue and staff will be with you."
"#;

    /// The configuration embed reflects the toggles, categories and cleanup
    /// mode of the loaded document.
    #[test]
    fn config_embed_reflects_loaded_document() {
        let config: TicketConfig = serde_yaml::from_str(SAMPLE).unwrap();
        let embed = config_status_embed(&config);

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["title"], "Ticket Configuration");

        let fields = json["fields"].as_array().unwrap();
        let field = |name: &str| {
            fields
                .iter()
                .find(|f| f["name"] == name)
                .unwrap_or_else(|| panic!("missing field {}", name))["value"]
                .clone()
        };

        assert_eq!(field("Support Roles"), "<@&111111111111111111>");
        assert_eq!(field("Categories"), "Billing, Support");
        assert_eq!(field("Max Tickets Per User"), "2");
        assert_eq!(field("Claim Button"), "Enabled");
        assert_eq!(field("Staff-Only Close"), "Disabled");
        assert_eq!(field("Transcripts"), "Disabled");
        assert_eq!(field("Activity Check"), "Enabled (30 min)");
        assert_eq!(field("Cleanup Mode"), "verified");
    }
}
