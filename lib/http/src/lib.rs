//! HTTP access to the deskchat backend.
//!
//! [`ApiClient`] owns one connection pool and hands out the two endpoint
//! clients the widget runs against:
//!
//! - [`HttpChatBackend`]: posts the conversation history to the chat endpoint
//! - [`HttpTicketBackend`]: queries the ticket status endpoint by email

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod ticket;

pub use chat::HttpChatBackend;
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::HttpError;
pub use ticket::HttpTicketBackend;
