//! Conversation session.
//!
//! A session is one conversation with the chat backend: an identifier and
//! the ordered history of turns. History only grows; starting over means
//! replacing the whole session.

use crate::email::find_email;
use crate::message::Message;
use crate::protocol::ChatRequest;
use deskchat_core::SessionId;

/// A conversation session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    history: Vec<Message>,
}

impl Session {
    /// Creates an empty session with a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            history: Vec::new(),
        }
    }

    /// Creates a session whose first turn is the assistant's welcome text.
    #[must_use]
    pub fn with_welcome(welcome: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.history.push(Message::assistant(welcome));
        session
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::user(content))
    }

    /// Appends an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::assistant(content))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.history.push(message);
        &self.history[self.history.len() - 1]
    }

    /// Returns the number of turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if the session has no turns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the last turn, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.history.last()
    }

    /// Returns the most recently mentioned email address.
    ///
    /// Turns are scanned newest first; within a turn the first address wins.
    #[must_use]
    pub fn find_recent_email(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find_map(|message| find_email(&message.content))
    }

    /// Builds the body posted to the chat endpoint.
    #[must_use]
    pub fn chat_request(&self) -> ChatRequest {
        ChatRequest {
            history: self.history.clone(),
            session_id: Some(self.id.to_string()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
