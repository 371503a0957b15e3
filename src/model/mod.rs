//! Domain models for the ticket lifecycle.
//!
//! Repositories convert SeaORM entity models into these types at the data
//! layer boundary so the rest of the application never handles raw rows.

pub mod panel;
pub mod rating;
pub mod ticket;
