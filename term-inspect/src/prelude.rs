//! Prelude for commonly used types and traits in term-inspect.

pub use crate::config::InspectConfig;
pub use crate::discovery::{DiscoveryConfig, KeyDiscovery, KeySet};
pub use crate::error::{ErrorContext, InspectError, Result};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::table::{ArrowTable, CellValue, JsonTable, Table, ValueShape};
