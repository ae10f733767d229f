//! Display tree.
//!
//! [`render`] maps widget state to a [`View`]. It is pure: the same state
//! always renders the same view, and a front-end redraws by diffing views
//! rather than patching nodes as events arrive.

use crate::event::Event;
use crate::texts::WidgetTexts;
use crate::transcript::{Entry, EntryKind, Transcript};
use chrono::Local;
use deskchat_core::{EntryId, PollId};

/// Who a bubble is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// The visitor.
    User,
    /// The bot, including widget-generated notices.
    Assistant,
}

/// Visual treatment of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A conversation turn.
    Message,
    /// A failure notice.
    Error,
    /// A ticket confirmation.
    Confirmation,
    /// A ticket still being processed.
    Waiting,
}

/// An interactive control attached to a bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Re-check a ticket that was not found yet.
    RetryTicket {
        /// Poll to re-check.
        poll_id: PollId,
        /// Button label.
        label: String,
    },
}

impl Action {
    /// Returns the event activating this action produces.
    #[must_use]
    pub fn event(&self) -> Event {
        match self {
            Self::RetryTicket { poll_id, .. } => Event::RetryTicket(*poll_id),
        }
    }

    /// Returns the label shown for this action.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::RetryTicket { label, .. } => label,
        }
    }
}

/// One rendered message bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    /// Identifier of the transcript entry this bubble shows.
    pub id: EntryId,
    /// Attribution.
    pub author: Author,
    /// Visual treatment.
    pub tone: Tone,
    /// Text content (markdown-flavored).
    pub text: String,
    /// Local `HH:MM` label.
    pub time: String,
    /// Attached control, if any.
    pub action: Option<Action>,
}

/// The whole widget surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Bubbles in display order.
    pub bubbles: Vec<Bubble>,
    /// Whether the typing indicator shows.
    pub typing: bool,
    /// Whether the input field and send button accept input.
    pub input_enabled: bool,
}

impl View {
    /// Returns the most recent action on the surface.
    #[must_use]
    pub fn latest_action(&self) -> Option<&Action> {
        self.bubbles.iter().rev().find_map(|b| b.action.as_ref())
    }
}

/// Renders the surface.
///
/// `busy` is true while a chat request is outstanding. `offers_retry`
/// tells whether a poll currently accepts a re-check.
pub fn render(
    transcript: &Transcript,
    busy: bool,
    texts: &WidgetTexts,
    offers_retry: impl Fn(PollId) -> bool,
) -> View {
    View {
        bubbles: transcript
            .entries()
            .iter()
            .map(|entry| render_entry(entry, texts, &offers_retry))
            .collect(),
        typing: busy,
        input_enabled: !busy,
    }
}

fn render_entry(
    entry: &Entry,
    texts: &WidgetTexts,
    offers_retry: &impl Fn(PollId) -> bool,
) -> Bubble {
    let (author, tone, text, action) = match &entry.kind {
        EntryKind::UserMessage(text) => (Author::User, Tone::Message, text.clone(), None),
        EntryKind::AssistantMessage(text) => {
            (Author::Assistant, Tone::Message, text.clone(), None)
        }
        EntryKind::ChatError(reason) => (
            Author::Assistant,
            Tone::Error,
            texts.chat_error(reason),
            None,
        ),
        EntryKind::TicketConfirmed(details) => (
            Author::Assistant,
            Tone::Confirmation,
            texts.ticket_confirmation(details),
            None,
        ),
        EntryKind::TicketWaiting(poll_id) => {
            let action = offers_retry(*poll_id).then(|| Action::RetryTicket {
                poll_id: *poll_id,
                label: texts.ticket_retry_label.clone(),
            });
            (
                Author::Assistant,
                Tone::Waiting,
                texts.ticket_waiting.clone(),
                action,
            )
        }
        EntryKind::TicketError => (
            Author::Assistant,
            Tone::Error,
            texts.ticket_error.clone(),
            None,
        ),
    };

    Bubble {
        id: entry.id,
        author,
        tone,
        text,
        time: entry
            .posted_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string(),
        action,
    }
}
