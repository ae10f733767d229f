//! Shared HTTP client for the backend.

use crate::chat::HttpChatBackend;
use crate::config::ApiConfig;
use crate::error::HttpError;
use crate::ticket::HttpTicketBackend;
use rootcause::prelude::Report;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Body of the liveness endpoint.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Connection pool plus endpoint configuration.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, Report<HttpError>> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| HttpError::ClientBuild {
            details: e.to_string(),
        })?;

        Ok(Self { http, config })
    }

    /// Returns a client for the chat endpoint.
    #[must_use]
    pub fn chat_backend(&self) -> HttpChatBackend {
        HttpChatBackend::new(self.http.clone(), self.config.chat_url())
    }

    /// Returns a client for the ticket status endpoint.
    #[must_use]
    pub fn ticket_backend(&self) -> HttpTicketBackend {
        HttpTicketBackend::new(self.http.clone(), self.config.ticket_url())
    }

    /// Probes the liveness endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unreachable or answers with a
    /// non-success status.
    #[instrument(skip(self), fields(url = %self.config.health_url()))]
    pub async fn health(&self) -> Result<(), Report<HttpError>> {
        let url = self.config.health_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HttpError::HealthCheck {
                url: url.clone(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::HealthCheck {
                url,
                details: format!("status {}", status),
            }
            .into());
        }

        let body: HealthResponse = response.json().await.map_err(|e| HttpError::HealthCheck {
            url: url.clone(),
            details: e.to_string(),
        })?;
        if body.status != "healthy" {
            return Err(HttpError::HealthCheck {
                url,
                details: format!("reported status '{}'", body.status),
            }
            .into());
        }

        debug!("backend healthy");
        Ok(())
    }
}
