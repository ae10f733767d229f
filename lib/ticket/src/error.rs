//! Error types for the ticket crate.
//!
//! - `TicketError`: a status check that produced no usable answer
//! - `PollError`: an operation not allowed in the poll's current state

use std::fmt;

/// Errors from one query of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// The request never produced a response.
    Transport { details: String },
    /// The response body was not the expected JSON.
    Parse { details: String },
}

impl fmt::Display for TicketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { details } => write!(f, "ticket check failed: {details}"),
            Self::Parse { details } => {
                write!(f, "invalid ticket status response: {details}")
            }
        }
    }
}

impl std::error::Error for TicketError {}

/// Errors from driving a poll's state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The requested step does not apply to the current state.
    InvalidTransition { from: String, action: &'static str },
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                write!(f, "cannot {action} a poll in state {from}")
            }
        }
    }
}

impl std::error::Error for PollError {}
