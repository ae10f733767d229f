//! Wire format of the chat endpoint.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Phrase the chat backend puts in a reply once it has queued ticket
/// creation. Must match the backend's text verbatim.
pub const TICKET_PENDING_MARKER: &str = "Votre demande est en cours de traitement";

/// Returns true if a bot reply announces an asynchronously created ticket.
#[must_use]
pub fn signals_pending_ticket(reply: &str) -> bool {
    reply.contains(TICKET_PENDING_MARKER)
}

/// Body posted to the chat endpoint: the full history plus the session id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Every turn of the conversation so far, oldest first.
    pub history: Vec<Message>,
    /// The conversation this history belongs to.
    pub session_id: Option<String>,
}

/// Body returned by the chat endpoint.
///
/// On success `response` holds the bot reply. On failure it may hold a
/// human-readable reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    /// Reply text or failure reason.
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatReply {
    /// Returns the reply text if it is present and non-empty.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        self.response.filter(|text| !text.is_empty())
    }
}
