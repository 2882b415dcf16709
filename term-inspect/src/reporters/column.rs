//! Key report for a single nested column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::discovery::KeyExample;
use crate::prelude::*;

/// One discovered path, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub path: String,
    /// Traversal steps from the cell root
    pub depth: usize,
    /// Tree indentation level, zero for top-level keys
    pub indent: usize,
    /// Rendered value from the first sample containing the path
    pub example: String,
    /// Row the example was taken from
    pub row: usize,
}

impl From<KeyExample> for KeyEntry {
    fn from(example: KeyExample) -> Self {
        Self {
            indent: example.depth.saturating_sub(1),
            path: example.path,
            depth: example.depth,
            example: example.example,
            row: example.row,
        }
    }
}

/// The discovered key structure of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column: String,
    pub dtype: String,
    /// Non-null values inspected
    pub sampled: usize,
    /// Rows visited to collect them
    pub rows_scanned: usize,
    pub max_depth: usize,
    pub generated_at: DateTime<Utc>,
    /// Paths in first-seen order
    pub keys: Vec<KeyEntry>,
}

impl ColumnReport {
    /// The discovered paths, in order.
    pub fn paths(&self) -> Vec<&str> {
        self.keys.iter().map(|k| k.path.as_str()).collect()
    }
}

/// Builds [`ColumnReport`]s.
#[derive(Debug, Clone, Default)]
pub struct ColumnReporter {
    discovery: KeyDiscovery,
}

impl ColumnReporter {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            discovery: KeyDiscovery::new(config),
        }
    }

    /// Reports the keys of `column`.
    ///
    /// Fails with [`InspectError::ColumnNotFound`] if `table` has no such column.
    #[instrument(skip(self, table))]
    pub fn report<T: Table>(&self, table: &T, column: &str) -> Result<ColumnReport> {
        let sample = self.discovery.sample(table, column)?;
        let keys: Vec<KeyEntry> = self
            .discovery
            .examples_in(&sample)
            .into_iter()
            .map(KeyEntry::from)
            .collect();

        let dtype = table
            .column_index(column)
            .map(|index| table.column_dtype(index))
            .unwrap_or_default();

        info!(column, keys = keys.len(), sampled = sample.len(), "Built column report");

        Ok(ColumnReport {
            column: column.to_string(),
            dtype,
            sampled: sample.len(),
            rows_scanned: sample.rows_scanned,
            max_depth: self.discovery.config().max_depth,
            generated_at: Utc::now(),
            keys,
        })
    }
}
