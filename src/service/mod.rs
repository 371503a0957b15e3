//! Services handling ticket business logic.

pub mod lifecycle;
pub mod lock;
pub mod logs;
pub mod panel;
