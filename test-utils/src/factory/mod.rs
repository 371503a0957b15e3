//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories automatically handle unique identifiers,
//! making tests more concise and maintainable.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let ticket = factory::ticket::create_ticket(&db, "100", "creator").await?;
//!
//!     // Create a ticket together with its unset rating record
//!     let (ticket, rating) = factory::helpers::create_ticket_with_rating(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! use test_utils::factory::ticket::TicketFactory;
//!
//! let ticket = TicketFactory::new(&db, "100")
//!     .creator_id("42")
//!     .category("billing")
//!     .status("claimed")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `ticket` - Create ticket entities
//! - `ticket_panel` - Create per-guild panel config entities
//! - `ticket_rating` - Create ticket rating entities
//! - `helpers` - Convenience methods for creating related entities together

pub mod helpers;
pub mod ticket;
pub mod ticket_panel;
pub mod ticket_rating;

// Re-export commonly used factory functions for concise usage
pub use ticket::create_ticket;
pub use ticket_panel::create_panel;
pub use ticket_rating::{create_rating, create_unrated};
