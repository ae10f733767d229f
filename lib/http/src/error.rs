//! Error types for the HTTP crate.
//!
//! Per-request failures are reported as the endpoint's own error type
//! ([`ChatError`](deskchat_conversation::ChatError),
//! [`TicketError`](deskchat_ticket::TicketError)) because the widget turns
//! them into visitor-facing text. `HttpError` covers client setup and the
//! liveness probe, which only the front-end sees.

use std::fmt;

/// Errors from setting up or probing the backend.
#[derive(Debug)]
pub enum HttpError {
    /// The HTTP client could not be constructed.
    ClientBuild { details: String },
    /// The liveness endpoint was unreachable or unhealthy.
    HealthCheck { url: String, details: String },
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientBuild { details } => {
                write!(f, "failed to build HTTP client: {}", details)
            }
            Self::HealthCheck { url, details } => {
                write!(f, "backend at '{}' is not healthy: {}", url, details)
            }
        }
    }
}

impl std::error::Error for HttpError {}
