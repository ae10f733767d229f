//! Core types shared by the deskchat crates.
//!
//! This crate provides the strongly-typed identifiers used across the
//! widget and the `Result` alias used where startup errors carry layered
//! context.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{EntryId, PollId, SessionId, TaskId};
