use crate::data::rating::TicketRatingRepository;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create_unrated;
mod set_rating;
mod stats;
