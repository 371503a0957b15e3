use crate::error::{internal::InternalError, AppError};

/// Custom ID prefix of the DM rating select menu.
///
/// The channel id is embedded in the component identifier so a rating can be
/// attributed to its ticket long after the channel itself is gone.
pub const RATING_MENU_PREFIX: &str = "ratingMenu-";

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.clone(),
            source: e,
        })?;

    Ok(result)
}

/// Builds the rating select menu custom ID for a ticket channel.
pub fn rating_menu_id(channel_id: u64) -> String {
    format!("{}{}", RATING_MENU_PREFIX, channel_id)
}

/// Recovers the ticket channel id from a rating select menu custom ID.
///
/// # Arguments
/// - `custom_id` - Component custom ID as received from Discord
///
/// # Returns
/// - `Some(u64)` - The embedded channel id
/// - `None` - The ID is not a rating menu ID or the suffix is not numeric
pub fn parse_rating_menu_id(custom_id: &str) -> Option<u64> {
    custom_id
        .strip_prefix(RATING_MENU_PREFIX)
        .and_then(|suffix| suffix.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_u64() {
        assert_eq!(parse_u64_from_string("42".to_string()).unwrap(), 42);
    }

    #[test]
    fn rejects_non_numeric_string() {
        assert!(parse_u64_from_string("not-a-number".to_string()).is_err());
    }

    /// The rating menu ID round-trips the channel id exactly.
    #[test]
    fn rating_menu_id_round_trips() {
        let id = rating_menu_id(123456789012345678);
        assert_eq!(id, "ratingMenu-123456789012345678");
        assert_eq!(parse_rating_menu_id(&id), Some(123456789012345678));
    }

    #[test]
    fn rejects_foreign_custom_ids() {
        assert_eq!(parse_rating_menu_id("close-ticket"), None);
        assert_eq!(parse_rating_menu_id("ratingMenu-"), None);
        assert_eq!(parse_rating_menu_id("ratingMenu-abc"), None);
    }
}
