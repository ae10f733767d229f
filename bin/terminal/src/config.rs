//! Front-end configuration.
//!
//! Loaded from `DESKCHAT_`-prefixed environment variables, with `__`
//! separating nested keys:
//!
//! ```text
//! DESKCHAT_API__BASE_URL=https://clinic.example
//! DESKCHAT_WIDGET__TYPING_DELAY_MS=500
//! DESKCHAT_WIDGET__POLL__MAX_RETRIES=5
//! ```
//!
//! See [`ApiConfig`] and [`WidgetConfig`] for every key and its default.

use deskchat_http::ApiConfig;
use deskchat_widget::WidgetConfig;
use serde::Deserialize;

/// Configuration composed from library configs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerminalConfig {
    /// Backend endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// Widget behavior and copy.
    #[serde(default)]
    pub widget: WidgetConfig,
}

impl TerminalConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(None)
    }

    /// Loads configuration from `source` instead of the process
    /// environment when it is given.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_source(
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("DESKCHAT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(source),
            )
            .build()?
            .try_deserialize()
    }
}
