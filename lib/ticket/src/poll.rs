//! Ticket poll state machine.
//!
//! ```text
//! Scheduled -> Checking -> Found
//!                       -> Errored
//!                       -> Pending --retry--> Scheduled   (retry_count < max_retries)
//!                       -> AwaitingManualRetry            (retry_count == max_retries)
//! ```
//!
//! Scheduling itself (how long until `Checking`) belongs to the caller; see
//! [`PollConfig::delay_for`](crate::PollConfig::delay_for).

use crate::error::{PollError, TicketError};
use crate::status::{TicketDetails, TicketStatus};
use deskchat_core::PollId;
use std::fmt;

/// The state of a ticket poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// A check is waiting for its delay to elapse.
    Scheduled,
    /// A check is in flight.
    Checking,
    /// The ticket was confirmed.
    Found(TicketDetails),
    /// Not found yet; the visitor may ask for another check.
    Pending,
    /// Not found and no checks left.
    AwaitingManualRetry,
    /// The check failed; polling stops.
    Errored,
}

impl PollState {
    /// Returns true if no further check will happen for this poll.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Found(_) | Self::AwaitingManualRetry | Self::Errored
        )
    }

    /// Returns true if the visitor may request another check.
    #[must_use]
    pub fn offers_retry(&self) -> bool {
        matches!(self, Self::Pending)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Checking => "checking",
            Self::Found(_) => "found",
            Self::Pending => "pending",
            Self::AwaitingManualRetry => "awaiting_manual_retry",
            Self::Errored => "errored",
        }
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Polling of the status endpoint for one email.
#[derive(Debug, Clone)]
pub struct TicketPoll {
    /// Poll identifier.
    pub id: PollId,
    /// The email the ticket was filed under.
    pub email: String,
    /// Checks performed before the current one.
    pub retry_count: u32,
    /// Current state.
    pub state: PollState,
    max_retries: u32,
}

impl TicketPoll {
    /// Creates a poll whose first check is scheduled.
    #[must_use]
    pub fn new(email: impl Into<String>, max_retries: u32) -> Self {
        Self {
            id: PollId::new(),
            email: email.into(),
            retry_count: 0,
            state: PollState::Scheduled,
            max_retries,
        }
    }

    /// Marks the scheduled check as started.
    ///
    /// # Errors
    ///
    /// Returns an error unless the poll is `Scheduled`.
    pub fn begin_check(&mut self) -> Result<(), PollError> {
        if self.state != PollState::Scheduled {
            return Err(self.invalid("begin checking"));
        }
        self.state = PollState::Checking;
        Ok(())
    }

    /// Applies the outcome of the in-flight check.
    ///
    /// # Errors
    ///
    /// Returns an error unless the poll is `Checking`.
    pub fn resolve(
        &mut self,
        outcome: Result<TicketStatus, TicketError>,
    ) -> Result<&PollState, PollError> {
        if self.state != PollState::Checking {
            return Err(self.invalid("resolve"));
        }
        self.state = match outcome {
            Ok(TicketStatus::Found(details)) => PollState::Found(details),
            Ok(TicketStatus::NotFound) if self.retry_count < self.max_retries => {
                PollState::Pending
            }
            Ok(TicketStatus::NotFound) => PollState::AwaitingManualRetry,
            Err(_) => PollState::Errored,
        };
        Ok(&self.state)
    }

    /// Schedules another check at the visitor's request.
    ///
    /// # Errors
    ///
    /// Returns an error unless the poll is `Pending`.
    pub fn retry(&mut self) -> Result<(), PollError> {
        if !self.state.offers_retry() {
            return Err(self.invalid("retry"));
        }
        self.retry_count += 1;
        self.state = PollState::Scheduled;
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> PollError {
        PollError::InvalidTransition {
            from: self.state.to_string(),
            action,
        }
    }
}
