//! What the display surface holds.
//!
//! The transcript differs from the conversation history: it also holds
//! error bubbles and ticket notices, which are never sent to the backend.

use chrono::{DateTime, Utc};
use deskchat_core::{EntryId, PollId};
use deskchat_ticket::TicketDetails;

/// Kind of content an entry shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A visitor turn.
    UserMessage(String),
    /// An assistant turn.
    AssistantMessage(String),
    /// A failed send, with the reason to show.
    ChatError(String),
    /// A confirmed ticket.
    TicketConfirmed(TicketDetails),
    /// A ticket not found yet, bound to the poll that may be re-checked.
    TicketWaiting(PollId),
    /// A failed ticket check.
    TicketError,
}

/// One item on the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry identifier.
    pub id: EntryId,
    /// Content.
    pub kind: EntryKind,
    /// When the entry was displayed.
    pub posted_at: DateTime<Utc>,
}

/// Entries in display order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry stamped now and returns its identifier.
    pub fn push(&mut self, kind: EntryKind) -> EntryId {
        self.push_at(kind, Utc::now())
    }

    /// Appends an entry with an explicit timestamp.
    pub fn push_at(&mut self, kind: EntryKind, posted_at: DateTime<Utc>) -> EntryId {
        let id = EntryId::new();
        self.entries.push(Entry {
            id,
            kind,
            posted_at,
        });
        id
    }

    /// Removes an entry. Returns false if it was not present.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
