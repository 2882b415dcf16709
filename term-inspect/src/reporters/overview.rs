//! Table-wide overview: which columns are nested and what they hold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::discovery::Sample;
use crate::prelude::*;

/// Classification of a column in the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Scalars, or sequences without any mapping
    Simple,
    /// At least one sampled value is a mapping or a sequence containing one
    Nested,
}

/// A column classified as simple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleColumnSummary {
    pub name: String,
    pub dtype: String,
}

/// A column classified as nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedColumnSummary {
    pub name: String,
    pub dtype: String,
    /// Non-null values inspected
    pub sampled: usize,
    /// Rows visited to collect them
    pub rows_scanned: usize,
    /// First-level keys (or indices) across the sampled values
    pub top_level_keys: Vec<String>,
    /// Rendering of the first sampled value
    pub sample: Option<String>,
}

/// Summary of a whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub rows: usize,
    pub columns: usize,
    pub simple_columns: Vec<SimpleColumnSummary>,
    pub nested_columns: Vec<NestedColumnSummary>,
    pub generated_at: DateTime<Utc>,
}

impl OverviewReport {
    /// Number of simple columns.
    pub fn simple_count(&self) -> usize {
        self.simple_columns.len()
    }

    /// Number of nested columns.
    pub fn nested_count(&self) -> usize {
        self.nested_columns.len()
    }

    /// Classification of the named column, if it exists.
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.nested_columns.iter().any(|c| c.name == column) {
            Some(ColumnKind::Nested)
        } else if self.simple_columns.iter().any(|c| c.name == column) {
            Some(ColumnKind::Simple)
        } else {
            None
        }
    }
}

/// Classifies a column from its sample.
pub fn classify_column<C: CellValue>(sample: &Sample<C>) -> ColumnKind {
    let nested = sample.values.iter().any(|sampled| match sampled.value.shape() {
        ValueShape::Mapping(_) => true,
        ValueShape::Sequence(items) => items.iter().any(|item| item.shape().is_mapping()),
        ValueShape::Scalar | ValueShape::Null => false,
    });

    if nested {
        ColumnKind::Nested
    } else {
        ColumnKind::Simple
    }
}

/// Builds [`OverviewReport`]s.
#[derive(Debug, Clone)]
pub struct OverviewReporter {
    sample_size: usize,
}

impl Default for OverviewReporter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl OverviewReporter {
    /// Creates a reporter that classifies each column from its first
    /// `sample_size` non-null values.
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Summarizes `table`.
    #[instrument(skip(self, table), fields(rows = table.num_rows(), sample_size = self.sample_size))]
    pub fn report<T: Table>(&self, table: &T) -> OverviewReport {
        // Depth 1 is enough for the top-level keys; classification only looks
        // one level into sequences.
        let discovery = KeyDiscovery::new(DiscoveryConfig::new(self.sample_size, 1));
        let mut simple_columns = Vec::new();
        let mut nested_columns = Vec::new();

        for (index, name) in table.column_names().into_iter().enumerate() {
            let dtype = table.column_dtype(index);
            let sample = match discovery.sample(table, &name) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!(column = %name, error = %e, "Skipping column");
                    continue;
                }
            };

            match classify_column(&sample) {
                ColumnKind::Simple => simple_columns.push(SimpleColumnSummary { name, dtype }),
                ColumnKind::Nested => {
                    let top_level_keys = discovery.keys_in(&sample).into_vec();
                    nested_columns.push(NestedColumnSummary {
                        name,
                        dtype,
                        sampled: sample.len(),
                        rows_scanned: sample.rows_scanned,
                        top_level_keys,
                        sample: sample.values.first().map(|s| s.value.render()),
                    });
                }
            }
        }

        info!(
            simple = simple_columns.len(),
            nested = nested_columns.len(),
            "Built table overview"
        );

        OverviewReport {
            rows: table.num_rows(),
            columns: table.num_columns(),
            simple_columns,
            nested_columns,
            generated_at: Utc::now(),
        }
    }
}
