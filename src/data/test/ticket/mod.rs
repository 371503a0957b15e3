use crate::{
    data::ticket::TicketRepository,
    model::ticket::{CreateTicketParams, TicketStatus},
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod count_open;
mod create;
mod delete;
mod mark_checked;
mod set_claimant;
mod set_status;
mod touch_activity;

/// Builds creation parameters for a test ticket.
fn params(channel_id: &str, creator_id: &str, creator_name: &str) -> CreateTicketParams {
    CreateTicketParams {
        channel_id: channel_id.to_string(),
        guild_id: "1".to_string(),
        creator_id: creator_id.to_string(),
        creator_name: creator_name.to_string(),
        category: "billing".to_string(),
        control_message_id: "900".to_string(),
    }
}
