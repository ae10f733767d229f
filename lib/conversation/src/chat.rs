//! Chat backend abstraction.

use crate::error::ChatError;
use crate::protocol::ChatRequest;
use async_trait::async_trait;

/// Sends a conversation to the chat endpoint and returns the bot reply.
///
/// This abstraction lets the widget run against the HTTP backend in
/// production and against scripted replies in tests.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Posts the history and returns the non-empty reply text.
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError>;
}
