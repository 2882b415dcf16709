//! DataFusion-backed file source.

use async_trait::async_trait;
use datafusion::prelude::{
    CsvReadOptions, DataFrame, NdJsonReadOptions, ParquetReadOptions, SessionContext,
};
use tracing::{info, instrument};

use super::{dotted_extension, expand_globs, DataSource, FileFormat};
use crate::prelude::*;

/// CSV, NDJSON or Parquet files, optionally given as glob patterns.
///
/// All matched files must share the format and extension of the source.
#[derive(Debug, Clone)]
pub struct FileSource {
    patterns: Vec<String>,
    format: FileFormat,
}

impl FileSource {
    /// Creates a source, detecting the format from the path extension.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path).ok_or_else(|| {
            InspectError::data_source(
                "file",
                format!("Unsupported file extension for '{path}' (expected .csv, .json, .ndjson, .jsonl or .parquet)"),
            )
        })?;
        Ok(Self::with_format(path, format))
    }

    /// Creates a source with an explicit format.
    pub fn with_format(path: impl Into<String>, format: FileFormat) -> Self {
        Self {
            patterns: vec![path.into()],
            format,
        }
    }

    /// Creates a source over several paths or glob patterns.
    pub fn from_patterns(patterns: Vec<String>, format: FileFormat) -> Self {
        Self { patterns, format }
    }

    /// The format files are read as.
    pub fn format(&self) -> FileFormat {
        self.format
    }
}

#[async_trait]
impl DataSource for FileSource {
    #[instrument(skip(self, ctx), fields(format = self.format.name()))]
    async fn read(&self, ctx: &SessionContext) -> Result<DataFrame> {
        let paths = expand_globs(&self.patterns).await?;
        // DataFusion checks every path against a single expected extension.
        let extension = dotted_extension(&paths[0]);
        if let Some(other) = paths.iter().find(|p| dotted_extension(p) != extension) {
            return Err(InspectError::data_source(
                self.format.name(),
                format!("'{other}' does not share the extension '{extension}'"),
            ));
        }

        let df = match self.format {
            FileFormat::Csv => {
                let options = CsvReadOptions::new().file_extension(&extension);
                ctx.read_csv(paths.clone(), options).await?
            }
            FileFormat::NdJson => {
                let options = NdJsonReadOptions::default().file_extension(&extension);
                ctx.read_json(paths.clone(), options).await?
            }
            FileFormat::Parquet => {
                let options = ParquetReadOptions {
                    file_extension: &extension,
                    ..Default::default()
                };
                ctx.read_parquet(paths.clone(), options).await?
            }
        };

        info!(files = paths.len(), "Opened file source");
        Ok(df)
    }

    fn description(&self) -> String {
        format!("{} file(s) {}", self.format.name(), self.patterns.join(", "))
    }
}
