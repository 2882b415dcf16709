//! Top-level configuration for the inspector.
//!
//! Every setting has a default, so a configuration file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "discovery": { "sample_size": 5, "max_depth": 4 },
//!   "formatter": { "max_example_length": 40 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::discovery::DiscoveryConfig;
use crate::formatters::FormatterConfig;
use crate::logging::setup::LoggingConfig;
use crate::prelude::*;

/// Configuration shared by the reporters and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Bounds for key discovery in the column report
    pub discovery: DiscoveryConfig,
    /// Non-null values sampled per column to classify it in the overview
    pub overview_sample_size: usize,
    /// Report rendering options
    pub formatter: FormatterConfig,
    /// Logging setup used by the CLI
    pub logging: LoggingConfig,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            overview_sample_size: 3,
            formatter: FormatterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl InspectConfig {
    /// A configuration that samples more rows and walks deeper.
    pub fn thorough() -> Self {
        Self {
            discovery: DiscoveryConfig::new(20, 6),
            overview_sample_size: 10,
            ..Self::default()
        }
    }

    /// Loads a JSON configuration file.
    #[instrument]
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the discovery bounds.
    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    /// Sets the overview sample size.
    pub fn with_overview_sample_size(mut self, size: usize) -> Self {
        self.overview_sample_size = size;
        self
    }

    /// Sets the formatter configuration.
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Sets the logging configuration.
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Checks that all sample sizes and depths are positive.
    pub fn validate(&self) -> Result<()> {
        self.discovery.validate()?;
        if self.overview_sample_size == 0 {
            return Err(InspectError::configuration(
                "overview_sample_size must be at least 1",
            ));
        }
        Ok(())
    }
}
