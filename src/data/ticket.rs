use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::model::ticket::{CreateTicketParams, Ticket, TicketStatus};

/// Repository for ticket record database operations.
///
/// Owns the lifetime of ticket rows: one row per live ticket channel, created
/// with the channel, updated on activity and lifecycle transitions, deleted
/// when the channel is deleted. Callers never cache rows beyond a single
/// operation.
pub struct TicketRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a ticket record for a freshly created channel.
    ///
    /// The record starts in the Open status with `activity_at` equal to
    /// `created_at` and no idle-check timestamp.
    ///
    /// # Arguments
    /// - `params` - Channel, guild, creator and category identifiers
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket domain model
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateTicketParams) -> Result<Ticket, DbErr> {
        let now = Utc::now();

        let entity = entity::ticket::ActiveModel {
            channel_id: ActiveValue::Set(params.channel_id),
            guild_id: ActiveValue::Set(params.guild_id),
            creator_id: ActiveValue::Set(params.creator_id),
            creator_name: ActiveValue::Set(params.creator_name),
            category: ActiveValue::Set(params.category),
            control_message_id: ActiveValue::Set(params.control_message_id),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            claimed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            activity_at: ActiveValue::Set(now),
            last_check_time: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    /// Retrieves a ticket record by its Discord channel ID.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - The ticket domain model
    /// - `Ok(None)` - The channel has no ticket record
    /// - `Err(DbErr)` - Database error during query or conversion failure
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<Ticket>, DbErr> {
        let entity = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Ticket::from_entity).transpose()
    }

    /// Retrieves all ticket records.
    ///
    /// Used by the activity sweeper to scan every live ticket.
    ///
    /// # Returns
    /// - `Ok(Vec<Ticket>)` - All ticket domain models
    /// - `Err(DbErr)` - Database error during query or conversion failure
    pub async fn all(&self) -> Result<Vec<Ticket>, DbErr> {
        let entities = entity::prelude::Ticket::find().all(self.db).await?;

        entities.into_iter().map(Ticket::from_entity).collect()
    }

    /// Counts the open tickets attributable to a creator.
    ///
    /// Source of truth for the per-user quota check. Closed tickets are
    /// excluded defensively, though their rows are normally deleted.
    ///
    /// # Arguments
    /// - `creator_id` - Discord's unique identifier for the user
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of live tickets created by the user
    /// - `Err(DbErr)` - Database error during query
    pub async fn count_open_by_creator(&self, creator_id: u64) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::CreatorId.eq(creator_id.to_string()))
            .filter(entity::ticket::Column::Status.ne(TicketStatus::Closed.as_str()))
            .count(self.db)
            .await
    }

    /// Updates the last-activity timestamp of a ticket.
    ///
    /// Called for every message observed in a ticket channel. Does nothing if
    /// the channel has no ticket record.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    /// - `at` - Timestamp of the observed message
    ///
    /// # Returns
    /// - `Ok(())` - Timestamp updated (or no record existed)
    /// - `Err(DbErr)` - Database error during update
    pub async fn touch_activity(&self, channel_id: u64, at: DateTime<Utc>) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(());
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.activity_at = ActiveValue::Set(at);
        active.update(self.db).await?;

        Ok(())
    }

    /// Records an idle-sweep notification for a ticket.
    ///
    /// Sets both `activity_at` and `last_check_time` to the notification
    /// time, which makes the notification cadence equal the idle threshold
    /// rather than the sweep period.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    /// - `at` - Timestamp of the notification
    ///
    /// # Returns
    /// - `Ok(())` - Timestamps updated (or no record existed)
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_checked(&self, channel_id: u64, at: DateTime<Utc>) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(());
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.activity_at = ActiveValue::Set(at);
        active.last_check_time = ActiveValue::Set(Some(at));
        active.update(self.db).await?;

        Ok(())
    }

    /// Sets the lifecycle status of a ticket.
    ///
    /// Transition validity is the caller's responsibility; the lifecycle
    /// service checks `TicketStatus::can_transition_to` before calling this.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    /// - `status` - New lifecycle status
    ///
    /// # Returns
    /// - `Ok(())` - Status updated (or no record existed)
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_status(&self, channel_id: u64, status: TicketStatus) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(());
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.update(self.db).await?;

        Ok(())
    }

    /// Sets the claiming support member and matching status of a ticket.
    ///
    /// A claimant moves the ticket to Claimed; clearing the claimant moves it
    /// back to Open.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    /// - `claimed_by` - Discord user ID of the claimant, or `None` to unclaim
    ///
    /// # Returns
    /// - `Ok(())` - Claim state updated (or no record existed)
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_claimant(
        &self,
        channel_id: u64,
        claimed_by: Option<String>,
    ) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(());
        };

        let status = if claimed_by.is_some() {
            TicketStatus::Claimed
        } else {
            TicketStatus::Open
        };

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.claimed_by = ActiveValue::Set(claimed_by);
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.update(self.db).await?;

        Ok(())
    }

    /// Deletes a ticket record by its Discord channel ID.
    ///
    /// Removes the record when the ticket channel is deleted. The rating
    /// record for the same channel is intentionally left in place.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    ///
    /// # Returns
    /// - `Ok(())` - Record deleted successfully (or didn't exist)
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn delete(&self, channel_id: u64) -> Result<(), DbErr> {
        entity::prelude::Ticket::delete_many()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "test/ticket/mod.rs"]
mod test;
