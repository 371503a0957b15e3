//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating related
//! entities together.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a ticket together with its unset rating record.
///
/// Mirrors what ticket creation does in production: a ticket row plus a
/// rating row with rating 0 keyed by the same channel id.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((ticket, rating))` - Tuple of the created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_ticket_with_rating(
    db: &DatabaseConnection,
) -> Result<(entity::ticket::Model, entity::ticket_rating::Model), DbErr> {
    let channel_id = next_id().to_string();

    let ticket = crate::factory::ticket::TicketFactory::new(db, &channel_id)
        .build()
        .await?;
    let rating = crate::factory::ticket_rating::create_unrated(db, &channel_id).await?;

    Ok((ticket, rating))
}
