//! # term-inspect - Key Discovery for Nested Columns
//!
//! term-inspect summarizes tables whose columns hold nested values: request and
//! response payloads, traces, event records. It answers two questions a
//! pipeline developer asks first: which columns are nested, and what keys do
//! they contain?
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use term_inspect::prelude::*;
//! use term_inspect::reporters::{print_column, print_overview};
//!
//! # fn example() -> term_inspect::error::Result<()> {
//! let table = JsonTable::from_rows(vec![
//!     json!({"id": 1, "payload": {"user": {"name": "Alice"}, "tags": ["a"]}}),
//!     json!({"id": 2, "payload": {"user": {"name": "Bob", "id": 7}}}),
//! ])?;
//!
//! // Direct key discovery
//! let keys = KeyDiscovery::default().discover(&table, "payload")?;
//! assert_eq!(
//!     keys.as_slice(),
//!     &["user", "user.name", "tags", "tags[0]", "user.id"]
//! );
//!
//! // Human-readable reports
//! let config = InspectConfig::default();
//! let mut out = std::io::stdout();
//! print_overview(&table, &config, &mut out)?;
//! print_column(&table, "payload", &config, &mut out)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Key paths
//!
//! Mapping keys are joined with `.`, sequence positions are written as `[i]`:
//! `items[0].id` is the `id` key of the first element of `items`. Discovery
//! looks at the first `sample_size` non-null values of a column and walks each
//! one at most `max_depth` steps, so its cost does not grow with the table.
//!
//! ## Architecture
//!
//! - **`table`**: the [`Table`](table::Table) and [`CellValue`](table::CellValue)
//!   traits, with Arrow and schemaless JSON adapters
//! - **`discovery`**: the key discovery engine
//! - **`reporters`**: table overview and per-column key reports
//! - **`formatters`**: human and JSON renderings of the reports
//! - **`sources`**: loading CSV, NDJSON and Parquet through DataFusion
//! - **`config`** and **`logging`**: configuration files and `tracing` setup

pub mod config;
pub mod discovery;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod reporters;
pub mod sources;
pub mod table;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
