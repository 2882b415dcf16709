//! Table abstraction consumed by key discovery and the reporters.
//!
//! The inspector never owns a table engine. It sees a table as an ordered
//! collection of named columns, each an ordered sequence of cells, through the
//! [`Table`] trait. Each cell is inspected through [`CellValue::shape`], which
//! classifies it once into the closed [`ValueShape`] variant that the traversal
//! matches on.
//!
//! Two adapters ship with the crate:
//!
//! - [`ArrowTable`]: an Arrow [`RecordBatch`](arrow::record_batch::RecordBatch),
//!   with `Struct` and `Map` columns as mappings and the list types as sequences.
//! - [`JsonTable`]: schemaless rows of [`serde_json::Value`], for data whose
//!   shapes are too heterogeneous to share one Arrow schema.

mod arrow_table;
mod json_table;

pub use arrow_table::{ArrowCell, ArrowTable};
pub use json_table::JsonTable;

/// The shape of a single cell value, produced by one inspection of the value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape<C> {
    /// String keys to values, in the mapping's iteration order.
    Mapping(Vec<(String, C)>),
    /// Ordered list of values.
    Sequence(Vec<C>),
    /// Any non-null leaf value.
    Scalar,
    /// Null or missing.
    Null,
}

impl<C> ValueShape<C> {
    /// Returns true for the mapping variant.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Short name of the variant, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Scalar => "scalar",
            Self::Null => "null",
        }
    }
}

/// A view over one cell of a table, or over a value nested inside a cell.
pub trait CellValue: Sized {
    /// Classifies this value and exposes its children.
    fn shape(&self) -> ValueShape<Self>;

    /// Renders the value for display.
    fn render(&self) -> String;

    /// Returns true if the value is null or missing.
    fn is_null(&self) -> bool {
        matches!(self.shape(), ValueShape::Null)
    }
}

/// An immutable, row-oriented view of named columns.
///
/// Implementations must return cells for every `row < num_rows()` and every
/// `column < num_columns()`.
pub trait Table {
    /// Cell view type handed out by this table.
    type Cell<'a>: CellValue
    where
        Self: 'a;

    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// Column names in table order.
    fn column_names(&self) -> Vec<String>;

    /// Number of columns.
    fn num_columns(&self) -> usize {
        self.column_names().len()
    }

    /// Position of the named column, if present.
    fn column_index(&self, name: &str) -> Option<usize>;

    /// Human-readable data type of the column at `column`.
    fn column_dtype(&self, column: usize) -> String;

    /// The cell at `column`, `row`.
    fn cell(&self, column: usize, row: usize) -> Self::Cell<'_>;
}
