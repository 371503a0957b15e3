use thiserror::Error;

use crate::model::ticket::TicketStatus;

/// Domain errors from the ticket lifecycle.
///
/// Every variant corresponds to a condition the acting user can understand and
/// often correct: a denied permission, a full quota, an out-of-range rating.
/// These are replied to the user and deliberately not logged as errors.
#[derive(Error, Debug)]
pub enum TicketError {
    /// The requested category key does not exist in the static configuration.
    #[error("Category \"{0}\" not found in config")]
    CategoryNotFound(String),

    /// The acting user lacks the support role (or creator status) required
    /// for this action.
    #[error("Permission denied for ticket action")]
    PermissionDenied,

    /// The user already has the maximum number of open tickets.
    #[error("Active ticket quota of {max} reached")]
    QuotaExceeded {
        /// Configured per-user maximum
        max: u64,
    },

    /// Another lifecycle-mutating operation is in progress on this channel.
    #[error("Ticket is busy")]
    Busy,

    /// The submitted rating is outside the accepted 1-5 range.
    #[error("Invalid rating value {0}")]
    InvalidRating(i64),

    /// No close reason arrived within the collection deadline.
    #[error("No close reason received within the deadline")]
    ReasonTimeout,

    /// The channel has no ticket record.
    #[error("Channel is not a ticket")]
    NotATicket,

    /// The requested status change is not a valid lifecycle transition.
    #[error("Invalid ticket transition from {from} to {to}")]
    InvalidTransition {
        from: TicketStatus,
        to: TicketStatus,
    },
}

impl TicketError {
    /// The ephemeral reply shown to the acting user.
    pub fn user_message(&self) -> String {
        match self {
            TicketError::CategoryNotFound(_) => "Selected category is not valid.".to_string(),
            TicketError::PermissionDenied => {
                "You do not have permission to do that.".to_string()
            }
            TicketError::QuotaExceeded { max } => format!(
                "You have reached the maximum limit of active tickets ({}).",
                max
            ),
            TicketError::Busy => {
                "Another ticket operation is already in progress. Try again shortly.".to_string()
            }
            TicketError::InvalidRating(_) => "Please choose a rating between 1 and 5.".to_string(),
            TicketError::ReasonTimeout => {
                "No reason received in time. The ticket stays open.".to_string()
            }
            TicketError::NotATicket => "This channel is not a ticket.".to_string(),
            TicketError::InvalidTransition { .. } => {
                "That action is not possible in the ticket's current state.".to_string()
            }
        }
    }
}
