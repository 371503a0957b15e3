pub use super::ticket::Entity as Ticket;
pub use super::ticket_panel::Entity as TicketPanel;
pub use super::ticket_rating::Entity as TicketRating;
