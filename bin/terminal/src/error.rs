//! Error types for the terminal front-end.

use std::fmt;

/// Errors that stop the front-end.
#[derive(Debug)]
pub enum TerminalError {
    /// Configuration could not be loaded.
    Config { details: String },
    /// The backend client could not be set up.
    Client { details: String },
    /// Reading input or writing output failed.
    Io { details: String },
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "invalid configuration: {}", details),
            Self::Client { details } => write!(f, "backend client error: {}", details),
            Self::Io { details } => write!(f, "terminal I/O error: {}", details),
        }
    }
}

impl std::error::Error for TerminalError {}
