pub mod prelude;

pub mod ticket;
pub mod ticket_panel;
pub mod ticket_rating;
