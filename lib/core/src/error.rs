//! Error handling foundation for deskchat.
//!
//! Each crate defines its own domain-specific error types in its own
//! error module. This module only provides the `Result` alias used where
//! a failure is reported through rootcause.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
