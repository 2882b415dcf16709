//! Logging utilities and configuration for term-inspect.
//!
//! Library code only emits `tracing` events and spans. Binaries and demos call
//! [`setup::init_logging`] once to install a subscriber.

/// Truncates a string to at most `max_length` characters, marking the cut.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((cut, _)) => format!("{}...(truncated)", &value[..cut]),
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use tracing::Level;

    use crate::error::{InspectError, Result};

    /// Configuration for term-inspect's logging setup.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct LoggingConfig {
        /// Log level for everything outside term-inspect
        #[serde(with = "level_name")]
        pub level: Level,
        /// Log level for term-inspect components specifically
        #[serde(with = "level_name")]
        pub inspect_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::WARN,
                inspect_level: Level::INFO,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::INFO,
                inspect_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Creates a configuration for machine-readable logs.
        pub fn structured() -> Self {
            Self {
                level: Level::WARN,
                inspect_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for term-inspect components.
        pub fn with_inspect_level(mut self, level: Level) -> Self {
            self.inspect_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},term_inspect={}",
                    self.level.as_str().to_lowercase(),
                    self.inspect_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Parses a level name such as `info` or `DEBUG`.
    pub fn parse_level(name: &str) -> Result<Level> {
        Level::from_str(name)
            .map_err(|_| InspectError::configuration(format!("unknown log level '{name}'")))
    }

    /// Installs the global subscriber. Logs go to stderr so report output on
    /// stdout stays clean.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use term_inspect::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(&LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: &LoggingConfig) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| InspectError::configuration(format!("logging already initialized: {e}")))
    }

    mod level_name {
        use super::*;

        pub fn serialize<S: Serializer>(
            level: &Level,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            serializer.serialize_str(&level.as_str().to_lowercase())
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> std::result::Result<Level, D::Error> {
            let name = String::deserialize(deserializer)?;
            parse_level(&name).map_err(serde::de::Error::custom)
        }
    }
}
