//! Domain models for ticket data operations.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Explicit lifecycle state of a ticket.
///
/// Tracked in the database rather than inferred from which controls happen to
/// be rendered. Transitions are validated server-side via `can_transition_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Ticket is open and unclaimed.
    Open,
    /// A support member has claimed the ticket.
    Claimed,
    /// A close has been confirmed and the deletion pipeline is running.
    ClosePending,
    /// Terminal state; the channel is gone.
    Closed,
}

impl TicketStatus {
    /// The database representation of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Claimed => "claimed",
            TicketStatus::ClosePending => "close_pending",
            TicketStatus::Closed => "closed",
        }
    }

    /// Parses a database status string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(TicketStatus::Open),
            "claimed" => Some(TicketStatus::Claimed),
            "close_pending" => Some(TicketStatus::ClosePending),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// Whether moving to `next` is a valid lifecycle transition.
    ///
    /// Open and Claimed tickets can swap (claim/unclaim) and either can enter
    /// ClosePending. ClosePending resolves to Closed, or back to Open/Claimed
    /// when the close is aborted. Closed is terminal.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Open, TicketStatus::Claimed)
                | (TicketStatus::Open, TicketStatus::ClosePending)
                | (TicketStatus::Claimed, TicketStatus::Open)
                | (TicketStatus::Claimed, TicketStatus::ClosePending)
                | (TicketStatus::ClosePending, TicketStatus::Closed)
                | (TicketStatus::ClosePending, TicketStatus::Open)
                | (TicketStatus::ClosePending, TicketStatus::Claimed)
        )
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket channel and its lifecycle bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Unique identifier for the ticket record.
    pub id: i32,
    /// Discord channel ID of the ticket channel (stored as String).
    pub channel_id: String,
    /// Discord guild ID the ticket belongs to (stored as String).
    pub guild_id: String,
    /// Discord user ID of the ticket creator (stored as String).
    pub creator_id: String,
    /// Username of the ticket creator at creation time.
    pub creator_name: String,
    /// Ticket category key from the static configuration.
    pub category: String,
    /// Discord message ID of the pinned control message (stored as String).
    pub control_message_id: String,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Discord user ID of the claiming support member, if claimed.
    pub claimed_by: Option<String>,
    /// Timestamp when the ticket channel was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last observed message in the channel.
    pub activity_at: DateTime<Utc>,
    /// Timestamp of the last idle-sweep notification, if any.
    pub last_check_time: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The converted ticket domain model
    /// - `Err(DbErr)` - The stored status string is not a known status
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, DbErr> {
        let status = TicketStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!("Unknown ticket status '{}'", entity.status))
        })?;

        Ok(Self {
            id: entity.id,
            channel_id: entity.channel_id,
            guild_id: entity.guild_id,
            creator_id: entity.creator_id,
            creator_name: entity.creator_name,
            category: entity.category,
            control_message_id: entity.control_message_id,
            status,
            claimed_by: entity.claimed_by,
            created_at: entity.created_at,
            activity_at: entity.activity_at,
            last_check_time: entity.last_check_time,
        })
    }
}

/// Parameters for creating a ticket record.
#[derive(Debug, Clone)]
pub struct CreateTicketParams {
    /// Discord channel ID of the newly created ticket channel.
    pub channel_id: String,
    /// Discord guild ID the ticket belongs to.
    pub guild_id: String,
    /// Discord user ID of the ticket creator.
    pub creator_id: String,
    /// Username of the ticket creator.
    pub creator_name: String,
    /// Ticket category key.
    pub category: String,
    /// Discord message ID of the pinned control message.
    pub control_message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Claim, unclaim and close-entry transitions are allowed; everything
    /// out of Closed is not.
    #[test]
    fn validates_lifecycle_transitions() {
        use TicketStatus::*;

        assert!(Open.can_transition_to(Claimed));
        assert!(Claimed.can_transition_to(Open));
        assert!(Open.can_transition_to(ClosePending));
        assert!(Claimed.can_transition_to(ClosePending));
        assert!(ClosePending.can_transition_to(Closed));

        // Aborted closes restore the prior status
        assert!(ClosePending.can_transition_to(Open));
        assert!(ClosePending.can_transition_to(Claimed));

        assert!(!Open.can_transition_to(Closed));
        assert!(!Open.can_transition_to(Open));
        assert!(!Claimed.can_transition_to(Claimed));
        assert!(!Closed.can_transition_to(Open));
        assert!(!Closed.can_transition_to(ClosePending));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TicketStatus::Open,
            TicketStatus::Claimed,
            TicketStatus::ClosePending,
            TicketStatus::Closed,
        ] {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TicketStatus::parse("nonsense"), None);
    }
}
