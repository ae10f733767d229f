//! Ticket-confirmation polling.
//!
//! After the chat backend announces that a ticket is being created, the
//! widget checks a status endpoint for that email on a fixed schedule.
//!
//! This crate provides:
//!
//! - **Poll state machine**: `TicketPoll` and its bounded retry rules
//! - **Status protocol**: the status endpoint's response and its meaning
//! - **Ticket backend**: the trait the widget queries the endpoint through

pub mod backend;
pub mod config;
pub mod error;
pub mod poll;
pub mod status;

pub use backend::TicketBackend;
pub use config::PollConfig;
pub use error::{PollError, TicketError};
pub use poll::{PollState, TicketPoll};
pub use status::{TicketDetails, TicketStatus, TicketStatusResponse};
