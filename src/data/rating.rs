use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::model::rating::{RatingStats, TicketRating};

/// Repository for ticket rating database operations.
///
/// Rating records share the channel-id key space with ticket records but have
/// an independent lifecycle: they are created alongside the ticket, survive
/// channel deletion, and accept updates keyed purely by the historical
/// channel id.
pub struct TicketRatingRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
}

impl<'a> TicketRatingRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an unset (rating 0) record for a new ticket channel.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    ///
    /// # Returns
    /// - `Ok(TicketRating)` - The created rating domain model
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create_unrated(&self, channel_id: u64) -> Result<TicketRating, DbErr> {
        let entity = entity::ticket_rating::ActiveModel {
            channel_id: ActiveValue::Set(channel_id.to_string()),
            rating: ActiveValue::Set(0),
            ..Default::default()
        };

        let entity = entity::prelude::TicketRating::insert(entity)
            .exec_with_returning(self.db)
            .await?;

        Ok(TicketRating::from_entity(entity))
    }

    /// Sets the rating for a ticket channel.
    ///
    /// Upserts so a rating submitted for a channel whose record was purged is
    /// still recorded. Bounds validation happens in the lifecycle service
    /// before this is called.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the (possibly
    ///   deleted) ticket channel
    /// - `rating` - Validated rating value 1-5
    ///
    /// # Returns
    /// - `Ok(TicketRating)` - The updated rating domain model
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn set_rating(&self, channel_id: u64, rating: i32) -> Result<TicketRating, DbErr> {
        let entity = entity::prelude::TicketRating::insert(entity::ticket_rating::ActiveModel {
            channel_id: ActiveValue::Set(channel_id.to_string()),
            rating: ActiveValue::Set(rating),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::ticket_rating::Column::ChannelId)
                .update_columns([entity::ticket_rating::Column::Rating])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(TicketRating::from_entity(entity))
    }

    /// Retrieves the rating record for a ticket channel.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    ///
    /// # Returns
    /// - `Ok(Some(TicketRating))` - The rating domain model
    /// - `Ok(None)` - No rating record exists for the channel
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<TicketRating>, DbErr> {
        let entity = entity::prelude::TicketRating::find()
            .filter(entity::ticket_rating::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        Ok(entity.map(TicketRating::from_entity))
    }

    /// Aggregates rating statistics across all rating records.
    ///
    /// # Returns
    /// - `Ok(RatingStats)` - Total tickets, rated count and rating sum
    /// - `Err(DbErr)` - Database error during query
    pub async fn stats(&self) -> Result<RatingStats, DbErr> {
        let entities = entity::prelude::TicketRating::find().all(self.db).await?;

        let mut stats = RatingStats {
            total_tickets: entities.len() as u64,
            ..Default::default()
        };

        for entity in entities {
            if entity.rating > 0 {
                stats.rated += 1;
                stats.sum += entity.rating as i64;
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "test/rating/mod.rs"]
mod test;
