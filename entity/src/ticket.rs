use sea_orm::entity::prelude::*;

/// One open support-ticket channel.
///
/// Creator identity and category are stored as structured columns rather than
/// being recovered from the channel topic, and `status` is the authoritative
/// lifecycle state independent of which controls happen to be rendered.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord channel ID of the ticket channel (stored as String).
    #[sea_orm(unique)]
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
    /// Lifecycle status: "open", "claimed", "close_pending" or "closed".
    pub status: String,
    /// Discord user ID of the claiming support member, if claimed.
    pub claimed_by: Option<String>,
    /// Timestamp when the ticket channel was created.
    pub created_at: DateTimeUtc,
    /// Timestamp of the last observed message in the channel.
    pub activity_at: DateTimeUtc,
    /// Timestamp of the last idle-sweep notification, if any.
    pub last_check_time: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
