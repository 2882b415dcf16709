//! Key discovery for nested columns.
//!
//! [`KeyDiscovery`] samples the first `sample_size` non-null cells of a column
//! and walks each sampled value to at most `max_depth` steps, collecting every
//! mapping-key and sequence-index path it passes into a [`KeySet`].
//!
//! Sampling is deliberately first-N rather than random: the cost of discovery
//! depends on `sample_size`, `max_depth` and the branching of the sampled
//! values, never on the number of rows in the table. The trade-off is that the
//! first rows are assumed to be representative of the column's shape.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use term_inspect::discovery::{DiscoveryConfig, KeyDiscovery};
//! use term_inspect::table::JsonTable;
//!
//! let table = JsonTable::from_columns(vec![(
//!     "data",
//!     vec![
//!         json!({"items": [{"id": 1}, {"id": 2}]}),
//!         json!({"items": [{"id": 3}]}),
//!     ],
//! )])
//! .unwrap();
//!
//! let engine = KeyDiscovery::new(DiscoveryConfig::new(3, 3));
//! let keys = engine.discover(&table, "data").unwrap();
//!
//! assert_eq!(keys.as_slice(), &["items", "items[0]", "items[0].id", "items[1]", "items[1].id"]);
//! ```

mod key_set;
pub mod path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::prelude::*;
use crate::table::{CellValue, Table, ValueShape};

pub use key_set::KeySet;

/// Bounds for one discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum number of non-null cells inspected (default: 3)
    pub sample_size: usize,
    /// Maximum number of traversal steps in an emitted path (default: 3)
    pub max_depth: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            sample_size: 3,
            max_depth: 3,
        }
    }
}

impl DiscoveryConfig {
    /// Creates a configuration with explicit bounds.
    pub fn new(sample_size: usize, max_depth: usize) -> Self {
        Self {
            sample_size,
            max_depth,
        }
    }

    /// Sets the sample size.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the maximum depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rejects zero bounds.
    ///
    /// The engine itself accepts them and returns an empty key set; this check
    /// is for user-supplied configuration where zero is almost certainly a typo.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(InspectError::configuration("sample_size must be at least 1"));
        }
        if self.max_depth == 0 {
            return Err(InspectError::configuration("max_depth must be at least 1"));
        }
        Ok(())
    }
}

/// A sampled non-null cell and the row it came from.
#[derive(Debug, Clone)]
pub struct SampledValue<C> {
    pub row: usize,
    pub value: C,
}

/// The first non-null cells of a column.
#[derive(Debug, Clone)]
pub struct Sample<C> {
    /// Name of the sampled column
    pub column: String,
    /// Sampled cells in row order
    pub values: Vec<SampledValue<C>>,
    /// Rows visited to fill the sample, nulls included
    pub rows_scanned: usize,
}

impl<C> Sample<C> {
    /// Number of sampled values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column had no non-null value in the scanned rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A discovered path together with a value observed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyExample {
    /// Dotted/bracketed path
    pub path: String,
    /// Traversal steps from the cell root
    pub depth: usize,
    /// Rendered value at this path in the first sample that contains it
    pub example: String,
    /// Row of that sample
    pub row: usize,
}

/// Builder for [`KeyDiscovery`].
#[derive(Debug, Clone, Default)]
pub struct KeyDiscoveryBuilder {
    config: DiscoveryConfig,
}

impl KeyDiscoveryBuilder {
    /// Set the number of non-null cells to inspect
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Set the maximum traversal depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Build the engine
    pub fn build(self) -> KeyDiscovery {
        KeyDiscovery::new(self.config)
    }
}

/// The key discovery engine.
#[derive(Debug, Clone, Default)]
pub struct KeyDiscovery {
    config: DiscoveryConfig,
}

impl KeyDiscovery {
    /// Creates an engine with the given bounds.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Creates a builder starting from the default bounds.
    pub fn builder() -> KeyDiscoveryBuilder {
        KeyDiscoveryBuilder::default()
    }

    /// The bounds this engine runs with.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Collects the first `sample_size` non-null cells of `column`.
    ///
    /// Scanning stops as soon as the sample is full, so rows past that point
    /// are never visited. A missing column fails before any row is read.
    #[instrument(skip(self, table), fields(sample_size = self.config.sample_size))]
    pub fn sample<'t, T: Table>(&self, table: &'t T, column: &str) -> Result<Sample<T::Cell<'t>>> {
        let index = table
            .column_index(column)
            .ok_or_else(|| InspectError::column_not_found(column))?;

        let limit = self.config.sample_size;
        let mut values = Vec::with_capacity(limit.min(table.num_rows()));
        let mut rows_scanned = 0;

        for row in 0..table.num_rows() {
            if values.len() >= limit {
                break;
            }
            rows_scanned += 1;
            let cell = table.cell(index, row);
            if cell.is_null() {
                continue;
            }
            values.push(SampledValue { row, value: cell });
        }

        debug!(
            column,
            rows_scanned,
            sampled = values.len(),
            "Collected column sample"
        );

        Ok(Sample {
            column: column.to_string(),
            values,
            rows_scanned,
        })
    }

    /// Discovers the key paths of `column`.
    ///
    /// Returns [`InspectError::ColumnNotFound`] if the column does not exist.
    /// Any other input, including an empty table or an all-null column, yields
    /// a (possibly empty) key set.
    #[instrument(skip(self, table), fields(sample_size = self.config.sample_size, max_depth = self.config.max_depth))]
    pub fn discover<T: Table>(&self, table: &T, column: &str) -> Result<KeySet> {
        let sample = self.sample(table, column)?;
        let keys = self.keys_in(&sample);
        debug!(column, keys = keys.len(), "Discovered keys");
        Ok(keys)
    }

    /// Discovers the key paths of an already collected sample.
    pub fn keys_in<C: CellValue>(&self, sample: &Sample<C>) -> KeySet {
        let mut keys = KeySet::new();
        for sampled in &sample.values {
            walk_paths(&sampled.value, self.config.max_depth, &mut |path, _, _| {
                keys.insert(path);
            });
        }
        keys
    }

    /// Discovers the key paths of `column` along with an example value for each.
    ///
    /// Paths come in the same order as [`discover`](Self::discover); each
    /// example is taken from the first sampled row where the path occurs.
    #[instrument(skip(self, table), fields(sample_size = self.config.sample_size, max_depth = self.config.max_depth))]
    pub fn discover_with_examples<T: Table>(
        &self,
        table: &T,
        column: &str,
    ) -> Result<Vec<KeyExample>> {
        let sample = self.sample(table, column)?;
        Ok(self.examples_in(&sample))
    }

    /// Same as [`discover_with_examples`](Self::discover_with_examples) for an
    /// already collected sample.
    pub fn examples_in<C: CellValue>(&self, sample: &Sample<C>) -> Vec<KeyExample> {
        let mut keys = KeySet::new();
        let mut examples = Vec::new();
        for sampled in &sample.values {
            walk_paths(&sampled.value, self.config.max_depth, &mut |path, depth, value| {
                if keys.insert(path) {
                    examples.push(KeyExample {
                        path: path.to_string(),
                        depth,
                        example: value.render(),
                        row: sampled.row,
                    });
                }
            });
        }
        examples
    }
}

/// Discovers the key paths of `column` with the given bounds.
pub fn discover_keys<T: Table>(table: &T, column: &str, config: DiscoveryConfig) -> Result<KeySet> {
    KeyDiscovery::new(config).discover(table, column)
}

/// Walks `value` and calls `visit(path, depth, child)` for every mapping entry
/// and sequence element reachable in at most `max_depth` steps.
///
/// Entries are visited in mapping iteration order, elements in index order, and
/// each child is visited before its own descendants. Scalars and nulls are
/// leaves. Depth is consumed once per level for mappings and sequences alike.
pub fn walk_paths<C, F>(value: &C, max_depth: usize, visit: &mut F)
where
    C: CellValue,
    F: FnMut(&str, usize, &C),
{
    walk(value, None, 0, max_depth, visit);
}

fn walk<C, F>(value: &C, prefix: Option<&str>, depth: usize, max_depth: usize, visit: &mut F)
where
    C: CellValue,
    F: FnMut(&str, usize, &C),
{
    if depth >= max_depth {
        return;
    }

    match value.shape() {
        ValueShape::Mapping(entries) => {
            for (key, child) in &entries {
                let child_path = path::join_key(prefix, key);
                visit(&child_path, depth + 1, child);
                walk(child, Some(&child_path), depth + 1, max_depth, visit);
            }
        }
        ValueShape::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = path::join_index(prefix, index);
                visit(&child_path, depth + 1, child);
                walk(child, Some(&child_path), depth + 1, max_depth, visit);
            }
        }
        ValueShape::Scalar | ValueShape::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::JsonTable;
    use serde_json::{json, Value};

    fn single_column(values: Vec<Value>) -> JsonTable {
        JsonTable::from_columns(vec![("col", values)]).unwrap()
    }

    fn paths(table: &JsonTable, sample_size: usize, max_depth: usize) -> Vec<String> {
        discover_keys(table, "col", DiscoveryConfig::new(sample_size, max_depth))
            .unwrap()
            .into_vec()
    }

    #[test]
    fn test_mapping_paths() {
        let table = single_column(vec![json!({"user": {"name": "Alice", "id": 100}})]);
        assert_eq!(paths(&table, 3, 3), vec!["user", "user.name", "user.id"]);
    }

    #[test]
    fn test_sequence_of_mappings() {
        let table = single_column(vec![json!({"items": [{"id": 1}, {"id": 2}]})]);
        assert_eq!(
            paths(&table, 3, 3),
            vec!["items", "items[0]", "items[0].id", "items[1]", "items[1].id"]
        );
    }

    #[test]
    fn test_depth_bound_still_emits_boundary_path() {
        let table = single_column(vec![json!({"a": {"b": {"c": {"d": 1}}}})]);
        assert_eq!(paths(&table, 3, 1), vec!["a"]);
        assert_eq!(paths(&table, 3, 2), vec!["a", "a.b"]);
        assert_eq!(paths(&table, 3, 10), vec!["a", "a.b", "a.b.c", "a.b.c.d"]);
    }

    #[test]
    fn test_depth_counts_sequence_steps() {
        let table = single_column(vec![json!({"grid": [[1, 2]]})]);
        assert_eq!(paths(&table, 3, 2), vec!["grid", "grid[0]"]);
        assert_eq!(
            paths(&table, 3, 3),
            vec!["grid", "grid[0]", "grid[0][0]", "grid[0][1]"]
        );
    }

    #[test]
    fn test_zero_bounds_yield_empty_set() {
        let table = single_column(vec![json!({"a": 1})]);
        assert!(paths(&table, 0, 3).is_empty());
        assert!(paths(&table, 3, 0).is_empty());
    }

    #[test]
    fn test_empty_mapping_and_scalars_add_nothing() {
        let table = single_column(vec![json!({"empty": {}, "n": null, "s": "x"})]);
        assert_eq!(paths(&table, 3, 3), vec!["empty", "n", "s"]);

        let scalars = single_column(vec![json!(1), json!("two"), json!(true)]);
        assert!(paths(&scalars, 3, 3).is_empty());
    }

    #[test]
    fn test_root_sequence() {
        let table = single_column(vec![json!([{"id": 1}])]);
        assert_eq!(paths(&table, 3, 3), vec!["[0]", "[0].id"]);
    }

    #[test]
    fn test_mixed_shapes_union_in_first_seen_order() {
        let table = single_column(vec![
            json!({"a": {"b": 1}}),
            json!({"a": {"c": 2}, "z": 0}),
        ]);
        assert_eq!(paths(&table, 3, 3), vec!["a", "a.b", "a.c", "z"]);
    }

    #[test]
    fn test_sample_skips_nulls_and_stops_when_full() {
        let table = single_column(vec![
            Value::Null,
            json!({"a": 1}),
            Value::Null,
            json!({"b": 1}),
            json!({"c": 1}),
            json!({"d": 1}),
        ]);
        let engine = KeyDiscovery::builder().sample_size(2).max_depth(3).build();

        let sample = engine.sample(&table, "col").unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.rows_scanned, 4);
        assert_eq!(
            sample.values.iter().map(|s| s.row).collect::<Vec<_>>(),
            vec![1, 3]
        );

        assert_eq!(engine.discover(&table, "col").unwrap().into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_all_null_column() {
        let table = single_column(vec![Value::Null, Value::Null]);
        let engine = KeyDiscovery::default();
        let sample = engine.sample(&table, "col").unwrap();
        assert!(sample.is_empty());
        assert_eq!(sample.rows_scanned, 2);
        assert!(engine.discover(&table, "col").unwrap().is_empty());
    }

    #[test]
    fn test_missing_column() {
        let table = single_column(vec![json!({"a": 1})]);
        let err = KeyDiscovery::default().discover(&table, "nope").unwrap_err();
        assert!(err.is_column_not_found());
    }

    #[test]
    fn test_examples_come_from_first_containing_sample() {
        let table = single_column(vec![
            json!({"user": {"name": "Alice"}}),
            json!({"user": {"name": "Bob", "id": 200}}),
        ]);
        let examples = KeyDiscovery::default()
            .discover_with_examples(&table, "col")
            .unwrap();

        let summary: Vec<(&str, usize, &str, usize)> = examples
            .iter()
            .map(|e| (e.path.as_str(), e.depth, e.example.as_str(), e.row))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("user", 1, r#"{"name":"Alice"}"#, 0),
                ("user.name", 2, "Alice", 0),
                ("user.id", 2, "200", 1),
            ]
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(DiscoveryConfig::default().validate().is_ok());
        assert!(DiscoveryConfig::new(0, 3).validate().is_err());
        assert!(DiscoveryConfig::new(3, 0).validate().is_err());
        assert_eq!(
            DiscoveryConfig::default().with_sample_size(10).with_max_depth(2),
            DiscoveryConfig::new(10, 2)
        );
    }
}
