//! Discord bot client and event handlers.

pub mod handler;
pub mod start;
