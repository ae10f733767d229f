//! Widget configuration.

use crate::texts::WidgetTexts;
use deskchat_ticket::PollConfig;
use serde::Deserialize;
use std::time::Duration;

/// Widget behavior and copy.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    /// How long the typing indicator shows before a reply is revealed.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Ticket-status polling.
    #[serde(default)]
    pub poll: PollConfig,

    /// Visitor-facing texts.
    #[serde(default)]
    pub texts: WidgetTexts,
}

fn default_typing_delay_ms() -> u64 {
    1000
}

impl WidgetConfig {
    /// Returns the typing delay.
    #[must_use]
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            poll: PollConfig::default(),
            texts: WidgetTexts::default(),
        }
    }
}
