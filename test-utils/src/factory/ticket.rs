//! Ticket factory for creating test ticket entities.
//!
//! This module provides factory methods for creating ticket entities with
//! sensible defaults, reducing boilerplate in tests. The factory supports
//! customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tickets with customizable fields.
///
/// Provides a builder pattern for creating ticket entities with default
/// values that can be overridden as needed for specific test scenarios.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::ticket::TicketFactory;
///
/// let ticket = TicketFactory::new(&db, "100")
///     .creator_name("somebody")
///     .category("billing")
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    guild_id: String,
    creator_id: String,
    creator_name: String,
    category: String,
    control_message_id: String,
    status: String,
    claimed_by: Option<String>,
    created_at: chrono::DateTime<Utc>,
    activity_at: chrono::DateTime<Utc>,
    last_check_time: Option<chrono::DateTime<Utc>>,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: `"1"`
    /// - creator_id: `"{id}"` where id is auto-incremented
    /// - creator_name: `"user{id}"`
    /// - category: `"support"`
    /// - control_message_id: `"1"`
    /// - status: `"open"`
    /// - claimed_by: `None`
    /// - created_at / activity_at: now
    /// - last_check_time: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `channel_id` - Discord channel ID of the ticket channel
    ///
    /// # Returns
    /// - `TicketFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, channel_id: impl Into<String>) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            channel_id: channel_id.into(),
            guild_id: "1".to_string(),
            creator_id: id.to_string(),
            creator_name: format!("user{}", id),
            category: "support".to_string(),
            control_message_id: "1".to_string(),
            status: "open".to_string(),
            claimed_by: None,
            created_at: now,
            activity_at: now,
            last_check_time: None,
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the creator's Discord user ID.
    pub fn creator_id(mut self, creator_id: impl Into<String>) -> Self {
        self.creator_id = creator_id.into();
        self
    }

    /// Sets the creator's username.
    pub fn creator_name(mut self, creator_name: impl Into<String>) -> Self {
        self.creator_name = creator_name.into();
        self
    }

    /// Sets the ticket category key.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the pinned control message's Discord message ID.
    pub fn control_message_id(mut self, control_message_id: impl Into<String>) -> Self {
        self.control_message_id = control_message_id.into();
        self
    }

    /// Sets the lifecycle status string.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the claiming support member's user ID.
    pub fn claimed_by(mut self, claimed_by: Option<String>) -> Self {
        self.claimed_by = claimed_by;
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: chrono::DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the last-activity timestamp.
    pub fn activity_at(mut self, activity_at: chrono::DateTime<Utc>) -> Self {
        self.activity_at = activity_at;
        self
    }

    /// Sets the last idle-sweep notification timestamp.
    pub fn last_check_time(mut self, last_check_time: Option<chrono::DateTime<Utc>>) -> Self {
        self.last_check_time = last_check_time;
        self
    }

    /// Inserts the ticket entity into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created ticket entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            channel_id: ActiveValue::Set(self.channel_id),
            guild_id: ActiveValue::Set(self.guild_id),
            creator_id: ActiveValue::Set(self.creator_id),
            creator_name: ActiveValue::Set(self.creator_name),
            category: ActiveValue::Set(self.category),
            control_message_id: ActiveValue::Set(self.control_message_id),
            status: ActiveValue::Set(self.status),
            claimed_by: ActiveValue::Set(self.claimed_by),
            created_at: ActiveValue::Set(self.created_at),
            activity_at: ActiveValue::Set(self.activity_at),
            last_check_time: ActiveValue::Set(self.last_check_time),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a ticket with default values for the given channel and creator.
///
/// # Arguments
/// - `db` - Database connection
/// - `channel_id` - Discord channel ID of the ticket channel
/// - `creator_name` - Username of the ticket creator
///
/// # Returns
/// - `Ok(Model)` - The created ticket entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_ticket(
    db: &DatabaseConnection,
    channel_id: impl Into<String>,
    creator_name: impl Into<String>,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, channel_id)
        .creator_name(creator_name)
        .build()
        .await
}
