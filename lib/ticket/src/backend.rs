//! Ticket status backend abstraction.

use crate::error::TicketError;
use crate::status::TicketStatus;
use async_trait::async_trait;

/// Queries the ticket status endpoint.
#[async_trait]
pub trait TicketBackend: Send + Sync {
    /// Looks up a recently created ticket for `email`.
    async fn check(&self, email: &str) -> Result<TicketStatus, TicketError>;
}
