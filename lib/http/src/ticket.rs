//! Ticket status endpoint client.

use async_trait::async_trait;
use deskchat_ticket::{TicketBackend, TicketError, TicketStatus, TicketStatusResponse};
use tracing::{debug, instrument};

/// Queries the ticket status endpoint.
///
/// The body is interpreted whatever the HTTP status: the endpoint reports
/// lookup failures as JSON error bodies, which read as "not found yet".
#[derive(Debug, Clone)]
pub struct HttpTicketBackend {
    http: reqwest::Client,
    url: String,
}

impl HttpTicketBackend {
    /// Creates a backend querying `url` through `http`.
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
impl TicketBackend for HttpTicketBackend {
    #[instrument(skip(self))]
    async fn check(&self, email: &str) -> Result<TicketStatus, TicketError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| TicketError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| TicketError::Transport {
            details: e.to_string(),
        })?;
        let parsed: TicketStatusResponse =
            serde_json::from_slice(&body).map_err(|e| TicketError::Parse {
                details: e.to_string(),
            })?;

        let ticket = parsed.into_status();
        debug!(
            status = status.as_u16(),
            found = matches!(ticket, TicketStatus::Found(_)),
            "ticket status received"
        );
        Ok(ticket)
    }
}
