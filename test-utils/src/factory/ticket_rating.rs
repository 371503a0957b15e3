//! Ticket rating factory for creating test rating entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an unset (rating 0) rating record for a channel.
///
/// # Arguments
/// - `db` - Database connection
/// - `channel_id` - Discord channel ID of the ticket channel
///
/// # Returns
/// - `Ok(Model)` - The created rating entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_unrated(
    db: &DatabaseConnection,
    channel_id: impl Into<String>,
) -> Result<entity::ticket_rating::Model, DbErr> {
    create_rating(db, channel_id, 0).await
}

/// Creates a rating record with the given value.
///
/// # Arguments
/// - `db` - Database connection
/// - `channel_id` - Discord channel ID of the ticket channel
/// - `rating` - Rating value (0 = unset, 1-5 = submitted)
///
/// # Returns
/// - `Ok(Model)` - The created rating entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_rating(
    db: &DatabaseConnection,
    channel_id: impl Into<String>,
    rating: i32,
) -> Result<entity::ticket_rating::Model, DbErr> {
    entity::ticket_rating::ActiveModel {
        channel_id: ActiveValue::Set(channel_id.into()),
        rating: ActiveValue::Set(rating),
        ..Default::default()
    }
    .insert(db)
    .await
}
