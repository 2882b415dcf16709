//! Schemaless JSON rows.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::prelude::*;

/// A JSON array of objects or an NDJSON file, read without schema inference.
///
/// Every cell keeps its original JSON value, so a column may hold a list of
/// strings in one row and a list of objects in the next.
#[derive(Debug, Clone)]
pub struct JsonRowsSource {
    path: PathBuf,
}

impl JsonRowsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file into a [`JsonTable`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<JsonTable> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let table = JsonTable::from_json_str(&text)?;
        info!(
            rows = table.num_rows(),
            columns = table.num_columns(),
            "Loaded schemaless rows"
        );
        Ok(table)
    }

    pub fn description(&self) -> String {
        format!("JSON rows {}", self.path.display())
    }
}
