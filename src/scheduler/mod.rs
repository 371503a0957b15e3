//! Background jobs.

pub mod activity_sweep;
