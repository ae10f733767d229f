//! Inputs and outputs of the widget state machine.

use deskchat_conversation::{ChatError, ChatRequest};
use deskchat_core::{PollId, SessionId};
use deskchat_ticket::{TicketError, TicketStatus};

/// Something that happened: a visitor action or a finished backend call.
#[derive(Debug, Clone)]
pub enum Event {
    /// The visitor asked for a fresh conversation (also sent on load).
    NewConversation,
    /// The visitor submitted the input field.
    Submit(String),
    /// The visitor activated the re-check action of a waiting bubble.
    RetryTicket(PollId),
    /// The chat endpoint answered a `PostChat`.
    ChatCompleted {
        /// Session the request was sent for.
        session_id: SessionId,
        /// Reply text or failure.
        result: Result<String, ChatError>,
    },
    /// The status endpoint answered a `CheckTicket`.
    TicketChecked {
        /// Poll the check belongs to.
        poll_id: PollId,
        /// Status or failure.
        result: Result<TicketStatus, TicketError>,
    },
}

/// Network work the widget asks its driver to perform.
///
/// Each effect must eventually be answered with the matching completion
/// event.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Post the history to the chat endpoint; answer with `ChatCompleted`.
    PostChat {
        /// Session the history belongs to.
        session_id: SessionId,
        /// Request body.
        request: ChatRequest,
    },
    /// Query the status endpoint; answer with `TicketChecked`.
    CheckTicket {
        /// Poll the check belongs to.
        poll_id: PollId,
        /// Email to look up.
        email: String,
    },
}
