//! Backend endpoint configuration.

use serde::Deserialize;
use std::time::Duration;

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the chat endpoint.
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Path of the ticket status endpoint.
    #[serde(default = "default_ticket_path")]
    pub ticket_path: String,

    /// Path of the liveness endpoint.
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Per-request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

fn default_ticket_path() -> String {
    "/api/check_ticket".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            ticket_path: default_ticket_path(),
            health_path: default_health_path(),
            request_timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    /// Returns a config pointing at `base_url` with default paths.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the absolute URL of the chat endpoint.
    #[must_use]
    pub fn chat_url(&self) -> String {
        self.join(&self.chat_path)
    }

    /// Returns the absolute URL of the ticket status endpoint.
    #[must_use]
    pub fn ticket_url(&self) -> String {
        self.join(&self.ticket_path)
    }

    /// Returns the absolute URL of the liveness endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        self.join(&self.health_path)
    }

    /// Returns the request timeout, if one is set.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
