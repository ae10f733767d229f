//! Chat endpoint client.

use async_trait::async_trait;
use deskchat_conversation::{ChatBackend, ChatError, ChatReply, ChatRequest};
use tracing::{debug, instrument, warn};

/// Posts conversation histories to the chat endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    url: String,
}

impl HttpChatBackend {
    /// Creates a backend posting to `url` through `http`.
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    #[instrument(skip(self, request), fields(turns = request.history.len()))]
    async fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ChatError::Transport {
            details: e.to_string(),
        })?;
        let reply = serde_json::from_slice::<ChatReply>(&body);

        if !status.is_success() {
            let reason = reply.ok().and_then(|reply| reply.response);
            warn!(status = status.as_u16(), ?reason, "chat endpoint returned error");
            return Err(ChatError::Http {
                status: status.as_u16(),
                reason,
            });
        }

        let reply = reply.map_err(|e| ChatError::MalformedResponse {
            details: e.to_string(),
        })?;
        let text = reply.into_text().ok_or_else(|| ChatError::MalformedResponse {
            details: "reply has no response text".to_string(),
        })?;

        debug!(chars = text.len(), "chat reply received");
        Ok(text)
    }
}
