//! Report formatting for overview and column reports.
//!
//! Reporters produce structured reports; formatters turn them into text. Two
//! formatters ship with the crate: [`HumanFormatter`] for terminals and
//! [`JsonFormatter`] for programmatic consumption.
//!
//! # Examples
//!
//! ```rust
//! use term_inspect::formatters::{HumanFormatter, ReportFormatter};
//! use term_inspect::reporters::OverviewReporter;
//! use term_inspect::table::JsonTable;
//!
//! let report = OverviewReporter::default().report(&JsonTable::new());
//! let text = HumanFormatter::new().format_overview(&report).unwrap();
//! assert!(text.contains("Rows: 0"));
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::logging::truncate_field;
use crate::prelude::*;
use crate::reporters::{ColumnReport, OverviewReport};

const RULE_WIDTH: usize = 80;

/// Configuration options for formatting reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Whether to include the report timestamp
    pub include_timestamps: bool,
    /// Whether to print an example value next to each key
    pub show_examples: bool,
    /// Maximum characters of an example value before it is truncated
    pub max_example_length: usize,
    /// Spaces per nesting level in the key tree
    pub indent_width: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            use_colors: false,
            include_timestamps: false,
            show_examples: true,
            max_example_length: 60,
            indent_width: 2,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only key paths.
    pub fn minimal() -> Self {
        Self {
            use_colors: false,
            include_timestamps: false,
            show_examples: false,
            max_example_length: 0,
            indent_width: 2,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self {
            use_colors: true,
            include_timestamps: true,
            show_examples: true,
            max_example_length: 200,
            indent_width: 2,
        }
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether to include timestamps.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Sets whether to show example values.
    pub fn with_examples(mut self, show: bool) -> Self {
        self.show_examples = show;
        self
    }

    /// Sets the maximum example length.
    pub fn with_max_example_length(mut self, max: usize) -> Self {
        self.max_example_length = max;
        self
    }
}

/// Output formats selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented text for terminals
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Creates the formatter for this output format.
    pub fn formatter(self, config: FormatterConfig) -> Box<dyn ReportFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter::with_config(config)),
            Self::Json => Box::new(JsonFormatter::with_config(config)),
        }
    }
}

/// Trait for rendering reports into an output format.
pub trait ReportFormatter {
    /// Formats a table overview.
    fn format_overview(&self, report: &OverviewReport) -> Result<String>;

    /// Formats the key report of one column.
    fn format_column(&self, report: &ColumnReport) -> Result<String>;

    /// Formats the notice printed when a requested column does not exist.
    fn format_missing_column(&self, column: &str, available: &[String]) -> Result<String>;
}

/// Formats reports in a human-readable layout suitable for console output.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn banner(&self, output: &mut String, title: &str) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(output, "{rule}")?;
        if self.config.use_colors {
            writeln!(output, "\x1b[1m{title}\x1b[0m")?;
        } else {
            writeln!(output, "{title}")?;
        }
        writeln!(output, "{rule}")?;
        Ok(())
    }

    fn example(&self, value: &str) -> String {
        truncate_field(value, self.config.max_example_length)
    }
}

impl ReportFormatter for HumanFormatter {
    fn format_overview(&self, report: &OverviewReport) -> Result<String> {
        let mut output = String::new();

        self.banner(&mut output, "📋 TABLE OVERVIEW")?;
        writeln!(output, "Rows: {}", report.rows)?;
        writeln!(output, "Columns: {}", report.columns)?;
        if self.config.include_timestamps {
            writeln!(output, "Generated: {}", report.generated_at.to_rfc3339())?;
        }

        if !report.simple_columns.is_empty() {
            writeln!(output)?;
            writeln!(output, "📊 Simple Columns ({}):", report.simple_columns.len())?;
            for column in &report.simple_columns {
                writeln!(output, "   - {}: {}", column.name, column.dtype)?;
            }
        }

        if !report.nested_columns.is_empty() {
            writeln!(output)?;
            writeln!(output, "🔍 Nested Columns ({}):", report.nested_columns.len())?;
            for column in &report.nested_columns {
                writeln!(output, "   - {}: {}", column.name, column.dtype)?;
                writeln!(
                    output,
                    "     Sampled: {} non-null of {} rows scanned",
                    column.sampled, column.rows_scanned
                )?;
                if !column.top_level_keys.is_empty() {
                    writeln!(
                        output,
                        "     Top-level keys: {}",
                        column.top_level_keys.join(", ")
                    )?;
                }
                if self.config.show_examples {
                    if let Some(ref sample) = column.sample {
                        writeln!(output, "     Sample: {}", self.example(sample))?;
                    }
                }
            }
            writeln!(output)?;
            writeln!(
                output,
                "💡 Inspect a nested column to see its full key structure."
            )?;
        }

        Ok(output)
    }

    fn format_column(&self, report: &ColumnReport) -> Result<String> {
        let mut output = String::new();

        self.banner(&mut output, &format!("🔍 Nested Column: '{}'", report.column))?;
        writeln!(output, "Type: {}", report.dtype)?;
        writeln!(
            output,
            "Sampled: {} non-null values ({} rows scanned)",
            report.sampled, report.rows_scanned
        )?;
        writeln!(output, "Max depth: {}", report.max_depth)?;
        if self.config.include_timestamps {
            writeln!(output, "Generated: {}", report.generated_at.to_rfc3339())?;
        }
        writeln!(output)?;

        if report.keys.is_empty() {
            writeln!(output, "No nested keys found in sampled values.")?;
            return Ok(output);
        }

        writeln!(output, "🔑 Keys ({}):", report.keys.len())?;
        for key in &report.keys {
            let indent = " ".repeat(key.indent * self.config.indent_width);
            if self.config.show_examples {
                writeln!(output, "{indent}{}: {}", key.path, self.example(&key.example))?;
            } else {
                writeln!(output, "{indent}{}", key.path)?;
            }
        }

        Ok(output)
    }

    fn format_missing_column(&self, column: &str, available: &[String]) -> Result<String> {
        let mut output = String::new();
        if self.config.use_colors {
            writeln!(output, "❌ \x1b[31mColumn '{column}' not found\x1b[0m")?;
        } else {
            writeln!(output, "❌ Column '{column}' not found")?;
        }
        if !available.is_empty() {
            writeln!(output, "Available columns: {}", available.join(", "))?;
        }
        Ok(output)
    }
}

/// Formats reports as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::default())
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, report: &T) -> Result<String> {
        let mut value = serde_json::to_value(report)?;
        if let Some(object) = value.as_object_mut() {
            if !self.config.include_timestamps {
                object.remove("generated_at");
            }
            if !self.config.show_examples {
                if let Some(keys) = object.get_mut("keys").and_then(|k| k.as_array_mut()) {
                    for key in keys.iter_mut().filter_map(|k| k.as_object_mut()) {
                        key.remove("example");
                    }
                }
            }
        }

        let text = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text + "\n")
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_overview(&self, report: &OverviewReport) -> Result<String> {
        self.render(report)
    }

    fn format_column(&self, report: &ColumnReport) -> Result<String> {
        self.render(report)
    }

    fn format_missing_column(&self, column: &str, available: &[String]) -> Result<String> {
        self.render(&serde_json::json!({
            "error": "column_not_found",
            "message": format!("Column '{column}' not found"),
            "column": column,
            "available_columns": available,
        }))
    }
}
