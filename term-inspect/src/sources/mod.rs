//! Loading tables from files.
//!
//! [`FileSource`] reads CSV, NDJSON and Parquet through DataFusion and yields an
//! [`ArrowTable`]. [`JsonRowsSource`] reads JSON arrays or NDJSON straight into
//! a [`JsonTable`], which keeps rows whose shapes do not fit one Arrow schema.

use std::fmt::Debug;
use std::path::Path;

use async_trait::async_trait;
use datafusion::prelude::{DataFrame, SessionContext};
use tracing::{debug, instrument};

use crate::prelude::*;

mod file;
mod schemaless;

pub use file::FileSource;
pub use schemaless::JsonRowsSource;

/// A source that DataFusion can read into a [`DataFrame`].
///
/// # Examples
///
/// ```rust,no_run
/// use term_inspect::sources::{DataSource, FileSource};
///
/// # async fn example() -> term_inspect::error::Result<()> {
/// let table = FileSource::new("data/traces.parquet")?.load().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Reads this source within `ctx`.
    async fn read(&self, ctx: &SessionContext) -> Result<DataFrame>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;

    /// Reads the whole source into memory as an [`ArrowTable`].
    #[instrument(skip(self), fields(source = %self.description()))]
    async fn load(&self) -> Result<ArrowTable> {
        let ctx = SessionContext::new();
        let df = self.read(&ctx).await?;
        let schema = df.schema().inner().clone();
        let batches = df.collect().await?;
        debug!(batches = batches.len(), "Collected source batches");
        ArrowTable::from_batches(schema, &batches)
    }
}

/// File formats understood by [`FileSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    /// Newline-delimited JSON objects
    NdJson,
    Parquet,
}

impl FileFormat {
    /// Detects the format from the path extension, ignoring case.
    ///
    /// `.json` is read as newline-delimited JSON, like DataFusion does.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" | "jsonl" => Some(Self::NdJson),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::NdJson => "NDJSON",
            Self::Parquet => "Parquet",
        }
    }
}

/// Returns the extension of `path` with its leading dot, e.g. `.jsonl`.
pub(crate) fn dotted_extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

/// Expands glob patterns into the files they match.
pub(crate) async fn expand_globs(patterns: &[String]) -> Result<Vec<String>> {
    use glob::glob;

    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob(pattern).map_err(|e| {
            InspectError::Configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        for entry in matches {
            let path = entry
                .map_err(|e| InspectError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

            if path.is_file() {
                if let Some(path_str) = path.to_str() {
                    paths.push(path_str.to_string());
                }
            }
        }
    }

    if paths.is_empty() {
        return Err(InspectError::data_source(
            "file",
            format!("No files found matching {}", patterns.join(", ")),
        ));
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_path("data.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_path("DATA.CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_path("rows.json"), Some(FileFormat::NdJson));
        assert_eq!(FileFormat::from_path("rows.ndjson"), Some(FileFormat::NdJson));
        assert_eq!(FileFormat::from_path("rows.jsonl"), Some(FileFormat::NdJson));
        assert_eq!(
            FileFormat::from_path("/tmp/t/traces.parquet"),
            Some(FileFormat::Parquet)
        );
        assert_eq!(FileFormat::from_path("notes.txt"), None);
        assert_eq!(FileFormat::from_path("no_extension"), None);
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension("a/b.jsonl"), ".jsonl");
        assert_eq!(dotted_extension("plain"), "");
    }

    #[tokio::test]
    async fn test_expand_globs() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.csv")).unwrap();
        File::create(dir.path().join("b.csv")).unwrap();
        File::create(dir.path().join("c.parquet")).unwrap();

        let pattern = format!("{}/*.csv", dir.path().display());
        let mut paths = expand_globs(&[pattern]).await.unwrap();
        paths.sort();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.csv"));

        let missing = format!("{}/*.ndjson", dir.path().display());
        let err = expand_globs(&[missing]).await.unwrap_err();
        assert!(matches!(err, InspectError::DataSource { .. }));
    }
}
