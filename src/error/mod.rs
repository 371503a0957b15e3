//! Error types for the ticketdesk bot.
//!
//! This module provides the application's error hierarchy. The `AppError` enum
//! serves as the top-level error type that wraps domain-specific errors. The
//! interaction router is the boundary where errors stop: `TicketError`
//! variants become user-visible ephemeral replies, everything else is logged
//! and surfaced as a generic failure message.

pub mod config;
pub mod internal;
pub mod ticket;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, ticket::TicketError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most
/// variants use `#[from]` for automatic error conversion. `TicketError` is the
/// only variant that carries a user-facing message; the rest are logged with
/// context and reported generically.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or config file loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Domain error from the ticket lifecycle (denials, validation failures).
    ///
    /// Surfaced to the user verbatim via `TicketError::user_message` and not
    /// logged as an error.
    #[error(transparent)]
    TicketErr(#[from] TicketError),

    /// Internal issue indicating unexpected state or a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error from the activity sweeper.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// The message to show the acting user, if this error is a user-facing
    /// denial or validation failure rather than an operational fault.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::TicketErr(err) => Some(err.user_message()),
            _ => None,
        }
    }
}
