//! Overview and column reporters.
//!
//! Both reporters are thin layers over [`discovery`](crate::discovery): they
//! build serializable reports that a [`ReportFormatter`] renders, and offer
//! `print_*` helpers that write the human rendering to any writer.

mod column;
mod overview;

use std::io::Write;

pub use column::{ColumnReport, ColumnReporter, KeyEntry};
pub use overview::{
    classify_column, ColumnKind, NestedColumnSummary, OverviewReport, OverviewReporter,
    SimpleColumnSummary,
};

use crate::formatters::HumanFormatter;
use crate::prelude::*;

/// Prints the overview of `table`.
pub fn print_overview<T: Table, W: Write>(
    table: &T,
    config: &InspectConfig,
    out: &mut W,
) -> Result<()> {
    let formatter = HumanFormatter::with_config(config.formatter.clone());
    write_overview_report(table, config, &formatter, out)
}

/// Renders the overview of `table` with `formatter` into `out`.
pub fn write_overview_report<T: Table, W: Write>(
    table: &T,
    config: &InspectConfig,
    formatter: &dyn ReportFormatter,
    out: &mut W,
) -> Result<()> {
    let report = OverviewReporter::new(config.overview_sample_size).report(table);
    let text = formatter.format_overview(&report)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Prints the key report of `column`.
///
/// A missing column is reported as a printed notice and is not an error.
pub fn print_column<T: Table, W: Write>(
    table: &T,
    column: &str,
    config: &InspectConfig,
    out: &mut W,
) -> Result<()> {
    let formatter = HumanFormatter::with_config(config.formatter.clone());
    write_column_report(table, column, config, &formatter, out)
}

/// Renders the key report of `column` with `formatter` into `out`,
/// downgrading a missing column to a notice.
pub fn write_column_report<T: Table, W: Write>(
    table: &T,
    column: &str,
    config: &InspectConfig,
    formatter: &dyn ReportFormatter,
    out: &mut W,
) -> Result<()> {
    let text = match ColumnReporter::new(config.discovery).report(table, column) {
        Ok(report) => formatter.format_column(&report)?,
        Err(InspectError::ColumnNotFound { column }) => {
            formatter.format_missing_column(&column, &table.column_names())?
        }
        Err(other) => return Err(other),
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}
