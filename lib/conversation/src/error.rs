//! Error types for the conversation crate.

use std::fmt;

/// Errors from one round-trip with the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The request never produced a response (connection, I/O).
    Transport { details: String },
    /// The endpoint answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Reason supplied by the backend in the `response` field, if any.
        reason: Option<String>,
    },
    /// A success status whose body carried no usable reply.
    MalformedResponse { details: String },
}

impl ChatError {
    /// Returns the human-readable reason supplied by the backend, if any.
    #[must_use]
    pub fn server_reason(&self) -> Option<&str> {
        match self {
            Self::Http {
                reason: Some(reason),
                ..
            } if !reason.is_empty() => Some(reason),
            _ => None,
        }
    }

    /// Returns true if the body of a successful response was unusable.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { details } => write!(f, "chat request failed: {details}"),
            Self::Http {
                status,
                reason: Some(reason),
            } => write!(f, "chat endpoint returned {status}: {reason}"),
            Self::Http {
                status,
                reason: None,
            } => write!(f, "chat endpoint returned {status}"),
            Self::MalformedResponse { details } => {
                write!(f, "malformed chat response: {details}")
            }
        }
    }
}

impl std::error::Error for ChatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_reason_only_for_http_errors() {
        let err = ChatError::Http {
            status: 400,
            reason: Some("Message utilisateur vide".to_string()),
        };
        assert_eq!(err.server_reason(), Some("Message utilisateur vide"));

        let err = ChatError::Http {
            status: 500,
            reason: None,
        };
        assert_eq!(err.server_reason(), None);

        let err = ChatError::Transport {
            details: "connection refused".to_string(),
        };
        assert_eq!(err.server_reason(), None);
    }

    #[test]
    fn empty_reason_is_ignored() {
        let err = ChatError::Http {
            status: 502,
            reason: Some(String::new()),
        };
        assert_eq!(err.server_reason(), None);
    }

    #[test]
    fn chat_error_display() {
        let err = ChatError::Http {
            status: 500,
            reason: None,
        };
        assert!(err.to_string().contains("500"));

        let err = ChatError::MalformedResponse {
            details: "missing response field".to_string(),
        };
        assert!(err.is_malformed());
        assert!(err.to_string().contains("missing response field"));
    }
}
