//! Conversation session for the deskchat widget.
//!
//! This crate provides:
//!
//! - **Session**: session identity and the append-only message history
//! - **Protocol**: the chat endpoint wire format and the pending-ticket marker
//! - **Chat backend**: the trait the widget sends history through

pub mod chat;
pub mod email;
pub mod error;
pub mod message;
pub mod protocol;
pub mod session;

pub use chat::ChatBackend;
pub use email::find_email;
pub use error::ChatError;
pub use message::{Message, MessageRole};
pub use protocol::{ChatReply, ChatRequest, TICKET_PENDING_MARKER, signals_pending_ticket};
pub use session::Session;
