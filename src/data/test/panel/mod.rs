use crate::{data::panel::TicketPanelRepository, model::panel::CategoryOption};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod upsert;

/// Builds a select-menu option for a test panel.
fn option(value: &str, label: &str) -> CategoryOption {
    CategoryOption {
        value: value.to_string(),
        label: label.to_string(),
        description: format!("Open a {} ticket", label),
        emoji: None,
    }
}
