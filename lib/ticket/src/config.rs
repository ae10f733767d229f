//! Poll scheduling configuration.

use serde::Deserialize;
use std::time::Duration;

/// Timing and bounds of ticket-status polling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollConfig {
    /// Delay before the first check, giving the backend time to file the ticket.
    #[serde(default = "default_first_delay_ms")]
    pub first_delay_ms: u64,

    /// Delay before every later check.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Checks after the first one that the visitor may request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Skip starting a poll when one for the same email is still unresolved
    /// in the same conversation.
    #[serde(default)]
    pub dedupe_by_email: bool,
}

fn default_first_delay_ms() -> u64 {
    7000
}

fn default_retry_delay_ms() -> u64 {
    4000
}

fn default_max_retries() -> u32 {
    3
}

impl PollConfig {
    /// Returns the delay before the check numbered `retry_count`.
    #[must_use]
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        if retry_count == 0 {
            Duration::from_millis(self.first_delay_ms)
        } else {
            Duration::from_millis(self.retry_delay_ms)
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            first_delay_ms: default_first_delay_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retries: default_max_retries(),
            dedupe_by_email: false,
        }
    }
}
