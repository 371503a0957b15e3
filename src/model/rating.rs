//! Domain models for ticket rating data operations.

use crate::error::ticket::TicketError;

/// Post-close rating for a ticket channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRating {
    /// Unique identifier for the rating record.
    pub id: i32,
    /// Discord channel ID of the (possibly deleted) ticket channel.
    pub channel_id: String,
    /// Rating 1-5, or 0 while unset.
    pub rating: i32,
}

impl TicketRating {
    /// Converts an entity model to a rating domain model at the repository boundary.
    pub fn from_entity(entity: entity::ticket_rating::Model) -> Self {
        Self {
            id: entity.id,
            channel_id: entity.channel_id,
            rating: entity.rating,
        }
    }
}

/// Validates a submitted rating value.
///
/// # Arguments
/// - `value` - Raw value from the rating select menu
///
/// # Returns
/// - `Ok(i32)` - Value within the accepted 1-5 range
/// - `Err(TicketError::InvalidRating)` - Value outside the range
pub fn validate_rating(value: i64) -> Result<i32, TicketError> {
    if (1..=5).contains(&value) {
        Ok(value as i32)
    } else {
        Err(TicketError::InvalidRating(value))
    }
}

/// Aggregated rating statistics across all tickets ever created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingStats {
    /// Number of rating records (one per ticket ever created).
    pub total_tickets: u64,
    /// Number of records with a submitted (non-zero) rating.
    pub rated: u64,
    /// Sum of all submitted ratings.
    pub sum: i64,
}

impl RatingStats {
    /// Average submitted rating, or `None` when nothing has been rated yet.
    pub fn average(&self) -> Option<f64> {
        if self.rated == 0 {
            None
        } else {
            Some(self.sum as f64 / self.rated as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Values 1-5 pass through unchanged; 0 and 6 are validation failures.
    #[test]
    fn validates_rating_bounds() {
        for value in 1..=5 {
            assert_eq!(validate_rating(value).unwrap(), value as i32);
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn average_ignores_unrated_tickets() {
        let stats = RatingStats {
            total_tickets: 4,
            rated: 2,
            sum: 9,
        };
        assert_eq!(stats.average(), Some(4.5));

        let empty = RatingStats::default();
        assert_eq!(empty.average(), None);
    }
}
