//! Ticket lifecycle operations.
//!
//! This service owns every state-changing ticket operation: channel creation,
//! claim and unclaim, the confirmed close pipeline and rating submission. All
//! permission checks and status transitions are validated here, never in the
//! interaction router, so a forged or stale component click cannot bypass
//! them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ButtonStyle, ChannelId, ChannelType, CreateActionRow, CreateButton, CreateChannel,
        CreateEmbed, CreateMessage, CreateSelectMenu, CreateSelectMenuKind,
        CreateSelectMenuOption, EditMessage, GuildId, Member, MessageId, PermissionOverwrite,
        PermissionOverwriteType, Permissions, RoleId, User, UserId,
    },
    gateway::ShardMessenger,
    http::Http,
};

use crate::{
    config::{CleanupMode, TicketConfig},
    data::{rating::TicketRatingRepository, ticket::TicketRepository},
    error::{ticket::TicketError, AppError},
    model::{
        rating::validate_rating,
        ticket::{CreateTicketParams, Ticket, TicketStatus},
    },
    service::{lock::ChannelLocks, logs::LogService},
    util::parse::{parse_u64_from_string, rating_menu_id},
};

/// Custom ID of the close button on the pinned control message.
pub const CLOSE_BUTTON_ID: &str = "close-ticket";
/// Custom ID of the confirm button in the ephemeral close confirmation.
pub const CONFIRM_CLOSE_BUTTON_ID: &str = "confirm-close-ticket";
/// Custom ID of the claim button on the pinned control message.
pub const CLAIM_BUTTON_ID: &str = "claim-ticket";
/// Custom ID of the unclaim button on the pinned control message.
pub const UNCLAIM_BUTTON_ID: &str = "unclaim-ticket";
/// Custom ID of the transcript toggle in the ephemeral close confirmation.
pub const TRANSCRIPT_BUTTON_ID: &str = "transcript-ticket";

/// Placeholder reason stored when reason collection is disabled or skipped.
const DEFAULT_CLOSE_REASON: &str = "No reason provided";

/// Seconds to wait for a close reason reply.
const REASON_TIMEOUT_SECS: u64 = 60;
/// Seconds between the deletion announcement and the channel deletion.
const DELETE_DELAY_SECS: u64 = 10;

/// Service struct for ticket lifecycle operations.
pub struct TicketLifecycleService<'a> {
    /// Database connection for ticket and rating records.
    pub db: &'a DatabaseConnection,
    /// Discord HTTP client for channel and message operations.
    pub http: Arc<Http>,
    /// Shared static ticket configuration.
    pub config: Arc<TicketConfig>,
}

impl<'a> TicketLifecycleService<'a> {
    /// Creates a new TicketLifecycleService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http` - Arc-wrapped Discord HTTP client
    /// - `config` - Shared static ticket configuration
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>, config: Arc<TicketConfig>) -> Self {
        Self { db, http, config }
    }

    /// Creates a ticket channel and its records for a panel selection.
    ///
    /// Resolves the selected category, enforces the per-user quota, creates a
    /// private channel visible to the creator and the support roles, posts and
    /// pins the control message, then persists the ticket and its unset rating
    /// record.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the ticket belongs to
    /// - `creator` - User who selected a category on the panel
    /// - `category_key` - Selected category key, matched case-insensitively
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError::TicketErr)` - Unknown category or quota reached
    /// - `Err(AppError)` - Database or Discord API error
    pub async fn create_ticket(
        &self,
        guild_id: GuildId,
        creator: &User,
        category_key: &str,
    ) -> Result<Ticket, AppError> {
        let Some((key, category)) = self.config.resolve_category(category_key) else {
            return Err(TicketError::CategoryNotFound(category_key.to_string()).into());
        };

        let repo = TicketRepository::new(self.db);

        let open = repo.count_open_by_creator(creator.id.get()).await?;
        if open >= self.config.max_active_tickets_per_user {
            return Err(TicketError::QuotaExceeded {
                max: self.config.max_active_tickets_per_user,
            }
            .into());
        }

        let parent = parse_u64_from_string(self.config.ticket_category_id.clone())?;

        // The @everyone role shares the guild's id
        let mut overwrites = vec![
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
            },
            PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(creator.id),
            },
        ];

        for role in &self.config.support_roles {
            let role_id = parse_u64_from_string(role.clone())?;
            overwrites.push(PermissionOverwrite {
                allow: Permissions::VIEW_CHANNEL
                    | Permissions::SEND_MESSAGES
                    | Permissions::READ_MESSAGE_HISTORY,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(RoleId::new(role_id)),
            });
        }

        let name = format!(
            "{}-{}",
            category.menu_label.to_lowercase(),
            creator.name.to_lowercase()
        );

        let channel = guild_id
            .create_channel(
                &self.http,
                CreateChannel::new(name)
                    .kind(ChannelType::Text)
                    .category(ChannelId::new(parent))
                    .permissions(overwrites),
            )
            .await?;

        let mut mentions = format!("<@{}>", creator.id);
        for role in &self.config.support_roles {
            mentions.push_str(&format!(" <@&{}>", role));
        }

        let control = channel
            .send_message(
                &self.http,
                CreateMessage::new()
                    .content(mentions)
                    .embed(control_embed(
                        &category.menu_label,
                        &category.embed_description,
                        None,
                    ))
                    .components(vec![CreateActionRow::Buttons(control_buttons(
                        self.config.enable_claim_button,
                        false,
                    ))]),
            )
            .await?;

        control.pin(&self.http).await?;

        let ticket = repo
            .create(CreateTicketParams {
                channel_id: channel.id.to_string(),
                guild_id: guild_id.to_string(),
                creator_id: creator.id.to_string(),
                creator_name: creator.name.clone(),
                category: key.to_string(),
                control_message_id: control.id.to_string(),
            })
            .await?;

        TicketRatingRepository::new(self.db)
            .create_unrated(channel.id.get())
            .await?;

        if let Err(e) = LogService::new(&self.config, self.http.clone())
            .log_ticket_creation(&ticket)
            .await
        {
            tracing::warn!("Failed to post creation log for {}: {}", ticket.channel_id, e);
        }

        Ok(ticket)
    }

    /// Claims a ticket for a support member.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel being claimed
    /// - `member` - Acting guild member
    ///
    /// # Returns
    /// - `Ok(())` - Ticket claimed and control message refreshed
    /// - `Err(AppError::TicketErr)` - Not a ticket, not support, or not claimable
    /// - `Err(AppError)` - Database or Discord API error
    pub async fn claim(&self, channel_id: ChannelId, member: &Member) -> Result<(), AppError> {
        if !self.config.enable_claim_button
            || !is_support(&self.config.support_roles, &member.roles)
        {
            return Err(TicketError::PermissionDenied.into());
        }

        let repo = TicketRepository::new(self.db);
        let ticket = repo
            .find_by_channel_id(channel_id.get())
            .await?
            .ok_or(TicketError::NotATicket)?;

        if !ticket.status.can_transition_to(TicketStatus::Claimed) {
            return Err(TicketError::InvalidTransition {
                from: ticket.status,
                to: TicketStatus::Claimed,
            }
            .into());
        }

        repo.set_claimant(channel_id.get(), Some(member.user.id.to_string()))
            .await?;

        self.refresh_control_message(channel_id, &ticket, Some(member.user.id.get()))
            .await
    }

    /// Releases a claimed ticket back to the open pool.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel being unclaimed
    /// - `member` - Acting guild member
    ///
    /// # Returns
    /// - `Ok(())` - Ticket reopened and control message refreshed
    /// - `Err(AppError::TicketErr)` - Not a ticket, not support, or not claimed
    /// - `Err(AppError)` - Database or Discord API error
    pub async fn unclaim(&self, channel_id: ChannelId, member: &Member) -> Result<(), AppError> {
        if !is_support(&self.config.support_roles, &member.roles) {
            return Err(TicketError::PermissionDenied.into());
        }

        let repo = TicketRepository::new(self.db);
        let ticket = repo
            .find_by_channel_id(channel_id.get())
            .await?
            .ok_or(TicketError::NotATicket)?;

        if !ticket.status.can_transition_to(TicketStatus::Open) {
            return Err(TicketError::InvalidTransition {
                from: ticket.status,
                to: TicketStatus::Open,
            }
            .into());
        }

        repo.set_claimant(channel_id.get(), None).await?;

        self.refresh_control_message(channel_id, &ticket, None).await
    }

    /// Checks that a user may close a ticket, without changing anything.
    ///
    /// Support members may always close; the creator may close unless closing
    /// is restricted to staff. Called before showing the close confirmation
    /// and again when the confirmation is clicked.
    ///
    /// # Arguments
    /// - `channel_id` - Ticket channel the close targets
    /// - `user_id` - Acting user
    /// - `member_roles` - The acting user's guild roles
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The ticket; the user may close it
    /// - `Err(AppError::TicketErr)` - Not a ticket or permission denied
    /// - `Err(AppError::DbErr)` - Database error during lookup
    pub async fn authorize_close(
        &self,
        channel_id: u64,
        user_id: UserId,
        member_roles: &[RoleId],
    ) -> Result<Ticket, AppError> {
        let ticket = TicketRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await?
            .ok_or(TicketError::NotATicket)?;

        let support = is_support(&self.config.support_roles, member_roles);
        let creator = ticket.creator_id == user_id.to_string();

        if !close_permitted(self.config.close_ticket_staff_only, support, creator) {
            return Err(TicketError::PermissionDenied.into());
        }

        Ok(ticket)
    }

    /// Runs the confirmed close pipeline for a ticket.
    ///
    /// Takes the channel's advisory lock, re-validates permission and the
    /// lifecycle transition, optionally collects a close reason from the
    /// closer, logs the closure, notifies the creator with a rating prompt,
    /// announces the deletion and finally deletes the channel and record
    /// according to the configured cleanup mode.
    ///
    /// A reason timeout aborts the close and restores the ticket's previous
    /// status.
    ///
    /// # Arguments
    /// - `shard` - Shard messenger used to collect the reason reply
    /// - `channel_id` - Ticket channel being closed
    /// - `closer` - User who confirmed the close
    /// - `closer_roles` - The closer's guild roles
    /// - `locks` - Per-channel advisory locks
    ///
    /// # Returns
    /// - `Ok(())` - Ticket closed and cleaned up
    /// - `Err(AppError::TicketErr)` - Busy, denied, reason timeout, or invalid state
    /// - `Err(AppError)` - Database or Discord API error
    pub async fn confirm_close(
        &self,
        shard: &ShardMessenger,
        channel_id: ChannelId,
        closer: &User,
        closer_roles: &[RoleId],
        locks: &ChannelLocks,
    ) -> Result<(), AppError> {
        let Some(_guard) = locks.try_acquire(channel_id.get()) else {
            return Err(TicketError::Busy.into());
        };

        let ticket = self
            .authorize_close(channel_id.get(), closer.id, closer_roles)
            .await?;

        let prior = ticket.status;
        if !prior.can_transition_to(TicketStatus::ClosePending) {
            return Err(TicketError::InvalidTransition {
                from: prior,
                to: TicketStatus::ClosePending,
            }
            .into());
        }

        let repo = TicketRepository::new(self.db);
        repo.set_status(channel_id.get(), TicketStatus::ClosePending)
            .await?;

        let reason = if self.config.enable_ticket_reason {
            let prompt = channel_id
                .say(
                    &self.http,
                    format!(
                        "<@{}> Please reply with a reason for closing this ticket within {} seconds.",
                        closer.id, REASON_TIMEOUT_SECS
                    ),
                )
                .await;
            if let Err(e) = prompt {
                repo.set_status(channel_id.get(), prior).await?;
                return Err(e.into());
            }

            let reply = channel_id
                .await_reply(shard)
                .author_id(closer.id)
                .timeout(std::time::Duration::from_secs(REASON_TIMEOUT_SECS))
                .await;

            match reply {
                Some(message) => message.content.clone(),
                None => {
                    repo.set_status(channel_id.get(), prior).await?;
                    return Err(TicketError::ReasonTimeout.into());
                }
            }
        } else {
            DEFAULT_CLOSE_REASON.to_string()
        };

        if let Err(e) = LogService::new(&self.config, self.http.clone())
            .log_ticket_closure(&ticket, closer.id.get(), &reason)
            .await
        {
            tracing::warn!("Failed to post closure log for {}: {}", ticket.channel_id, e);
        }

        if self.config.enable_notify_ticket_creator {
            if let Err(e) = self.notify_creator(&ticket, &reason).await {
                tracing::warn!(
                    "Failed to notify creator {} of closure: {}",
                    ticket.creator_id,
                    e
                );
            }
        }

        // The ticket is committed to closing at this point; a failed courtesy
        // announcement must not strand it in ClosePending
        if let Err(e) = channel_id
            .say(
                &self.http,
                format!(
                    "This ticket channel will be deleted in {} seconds.",
                    DELETE_DELAY_SECS
                ),
            )
            .await
        {
            tracing::warn!(
                "Failed to announce deletion of ticket channel {}: {}",
                channel_id,
                e
            );
        }

        tokio::time::sleep(std::time::Duration::from_secs(DELETE_DELAY_SECS)).await;

        match self.config.cleanup_mode {
            CleanupMode::BestEffort => {
                repo.delete(channel_id.get()).await?;
                if let Err(e) = channel_id.delete(&self.http).await {
                    tracing::warn!("Failed to delete ticket channel {}: {}", channel_id, e);
                }
            }
            CleanupMode::Verified => {
                if let Err(e) = channel_id.delete(&self.http).await {
                    repo.set_status(channel_id.get(), prior).await?;
                    return Err(e.into());
                }
                repo.delete(channel_id.get()).await?;
            }
        }

        tracing::info!(
            "Closed ticket {} (creator {}, category {})",
            ticket.channel_id,
            ticket.creator_id,
            ticket.category
        );

        Ok(())
    }

    /// Records a rating submitted from the post-close DM prompt.
    ///
    /// # Arguments
    /// - `channel_id` - Channel id embedded in the rating menu's custom ID
    /// - `user_id` - Acting user
    /// - `raw_value` - Selected menu value
    ///
    /// # Returns
    /// - `Ok(i32)` - The stored rating
    /// - `Err(AppError::TicketErr)` - Value outside the 1-5 range
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn submit_rating(
        &self,
        channel_id: u64,
        user_id: UserId,
        raw_value: &str,
    ) -> Result<i32, AppError> {
        let value = raw_value.parse::<i64>().unwrap_or(0);
        let rating = validate_rating(value)?;

        TicketRatingRepository::new(self.db)
            .set_rating(channel_id, rating)
            .await?;

        if let Err(e) = LogService::new(&self.config, self.http.clone())
            .log_ticket_rating(channel_id, user_id.get(), rating)
            .await
        {
            tracing::warn!("Failed to post rating log for {}: {}", channel_id, e);
        }

        Ok(rating)
    }

    /// Sends the closure notification and rating prompt to the creator's DMs.
    async fn notify_creator(&self, ticket: &Ticket, reason: &str) -> Result<(), AppError> {
        let creator_id = parse_u64_from_string(ticket.creator_id.clone())?;
        let channel_id = parse_u64_from_string(ticket.channel_id.clone())?;

        let dm = UserId::new(creator_id).create_dm_channel(&self.http).await?;

        let embed = CreateEmbed::new()
            .title("Your ticket has been closed")
            .description(format!(
                "Your **{}** ticket has been closed.\n**Reason:** {}",
                ticket.category, reason
            ))
            .color(0x5865f2);

        dm.send_message(
            &self.http,
            CreateMessage::new()
                .embed(embed)
                .components(vec![CreateActionRow::SelectMenu(rating_select_menu(
                    channel_id,
                ))]),
        )
        .await?;

        Ok(())
    }

    /// Rebuilds the pinned control message after a claim state change.
    ///
    /// The message is addressed by the id stored on the ticket record, so
    /// other pins in the channel cannot be mistaken for it. The embed and
    /// button row are rebuilt from scratch rather than patched, so repeated
    /// claim/unclaim cycles cannot accumulate stale fields.
    async fn refresh_control_message(
        &self,
        channel_id: ChannelId,
        ticket: &Ticket,
        claimed_by: Option<u64>,
    ) -> Result<(), AppError> {
        let control_id = parse_u64_from_string(ticket.control_message_id.clone())?;

        let (label, description) = match self.config.resolve_category(&ticket.category) {
            Some((_, category)) => (
                category.menu_label.clone(),
                category.embed_description.clone(),
            ),
            None => (ticket.category.clone(), String::new()),
        };

        channel_id
            .edit_message(
                &self.http,
                MessageId::new(control_id),
                EditMessage::new()
                    .embed(control_embed(&label, &description, claimed_by))
                    .components(vec![CreateActionRow::Buttons(control_buttons(
                        self.config.enable_claim_button,
                        claimed_by.is_some(),
                    ))]),
            )
            .await?;

        Ok(())
    }
}

/// Whether a member holds any of the configured support roles.
///
/// # Arguments
/// - `support_roles` - Configured support role ids (as strings)
/// - `member_roles` - The member's guild roles
pub fn is_support(support_roles: &[String], member_roles: &[RoleId]) -> bool {
    member_roles
        .iter()
        .any(|role| support_roles.iter().any(|s| s == &role.to_string()))
}

/// Whether a user may close a ticket.
///
/// Support members may always close. The creator may close too, unless
/// closing is restricted to staff.
///
/// # Arguments
/// - `staff_only` - Whether closing is restricted to support members
/// - `is_support` - Whether the acting user holds a support role
/// - `is_creator` - Whether the acting user created the ticket
pub fn close_permitted(staff_only: bool, is_support: bool, is_creator: bool) -> bool {
    is_support || (!staff_only && is_creator)
}

/// Builds the control message embed for a ticket.
fn control_embed(label: &str, description: &str, claimed_by: Option<u64>) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("{} Ticket", label))
        .description(description.to_string())
        .color(0x5865f2);

    if let Some(claimant) = claimed_by {
        embed = embed.field("Claimed by", format!("<@{}>", claimant), false);
    }

    embed
}

/// Builds the control message button row for a ticket.
fn control_buttons(claim_enabled: bool, claimed: bool) -> Vec<CreateButton> {
    let mut buttons = vec![CreateButton::new(CLOSE_BUTTON_ID)
        .label("Close")
        .style(ButtonStyle::Danger)
        .emoji('🔒')];

    if claim_enabled {
        if claimed {
            buttons.push(
                CreateButton::new(UNCLAIM_BUTTON_ID)
                    .label("Unclaim")
                    .style(ButtonStyle::Secondary),
            );
        } else {
            buttons.push(
                CreateButton::new(CLAIM_BUTTON_ID)
                    .label("Claim")
                    .style(ButtonStyle::Success)
                    .emoji('🙋'),
            );
        }
    }

    buttons
}

/// Builds the 1-5 rating select menu sent with the closure DM.
///
/// The ticket's channel id is embedded in the custom ID so the rating can be
/// attributed after the channel is gone.
pub fn rating_select_menu(channel_id: u64) -> CreateSelectMenu {
    let options = (1..=5)
        .map(|n| CreateSelectMenuOption::new("⭐".repeat(n), n.to_string()))
        .collect();

    CreateSelectMenu::new(
        rating_menu_id(channel_id),
        CreateSelectMenuKind::String { options },
    )
    .placeholder("Rate your support experience")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Support membership requires at least one configured role.
    #[test]
    fn detects_support_membership() {
        let support_roles = vec!["111".to_string(), "222".to_string()];

        assert!(is_support(&support_roles, &[RoleId::new(222)]));
        assert!(is_support(
            &support_roles,
            &[RoleId::new(333), RoleId::new(111)]
        ));
        assert!(!is_support(&support_roles, &[RoleId::new(333)]));
        assert!(!is_support(&support_roles, &[]));
    }

    /// Support always closes; creators only when closing is not staff-only.
    #[test]
    fn close_permission_matrix() {
        // support, any config
        assert!(close_permitted(false, true, false));
        assert!(close_permitted(true, true, false));

        // creator
        assert!(close_permitted(false, false, true));
        assert!(!close_permitted(true, false, true));

        // bystander
        assert!(!close_permitted(false, false, false));
        assert!(!close_permitted(true, false, false));
    }

    /// Claim buttons swap between claim and unclaim; close is always there.
    #[test]
    fn control_buttons_reflect_claim_state() {
        let unclaimed = control_buttons(true, false);
        assert_eq!(unclaimed.len(), 2);

        let claimed = control_buttons(true, true);
        assert_eq!(claimed.len(), 2);

        let no_claiming = control_buttons(false, false);
        assert_eq!(no_claiming.len(), 1);
    }
}
