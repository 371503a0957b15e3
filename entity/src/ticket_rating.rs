use sea_orm::entity::prelude::*;

/// Post-close rating for a ticket channel.
///
/// Created with rating 0 (unset) when the ticket is created and kept after the
/// channel is deleted so historical stats survive ticket cleanup.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord channel ID of the (possibly deleted) ticket channel.
    #[sea_orm(unique)]
    pub channel_id: String,
    /// Rating 1-5, or 0 while unset.
    pub rating: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
