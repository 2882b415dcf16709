//! Arrow-backed table adapter.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::json::reader::infer_json_schema_from_iterator;
use arrow::json::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use serde_json::Value;

use super::{CellValue, Table, ValueShape};
use crate::prelude::*;

const JSON_BATCH_SIZE: usize = 1024;

/// A table over a single Arrow [`RecordBatch`].
///
/// Multi-batch results (e.g. from a DataFusion query) are concatenated on
/// construction so that rows are addressed by one contiguous index.
#[derive(Debug, Clone)]
pub struct ArrowTable {
    batch: RecordBatch,
}

impl ArrowTable {
    /// Wraps a record batch.
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// A table with no rows and no columns.
    pub fn empty() -> Self {
        Self::new(RecordBatch::new_empty(Arc::new(Schema::empty())))
    }

    /// Concatenates `batches` into one table.
    ///
    /// `schema` is used when `batches` is empty; otherwise the schema of the
    /// first batch wins so that field metadata produced by the reader is kept.
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let schema = batches.first().map(|b| b.schema()).unwrap_or(schema);
        let batch = concat_batches(&schema, batches)?;
        Ok(Self::new(batch))
    }

    /// Builds a table from JSON objects, one per row, inferring the Arrow schema.
    ///
    /// Keys missing from a row become nulls. Rows whose shapes cannot be unified
    /// into one schema are rejected by the Arrow reader; use
    /// [`JsonTable`](super::JsonTable) for such data.
    pub fn from_json_rows(rows: &[Value]) -> Result<Self> {
        if rows.is_empty() {
            return Ok(Self::empty());
        }

        let schema = Arc::new(infer_json_schema_from_iterator(
            rows.iter().map(Ok::<_, ArrowError>),
        )?);
        let mut decoder = ReaderBuilder::new(schema.clone())
            .with_batch_size(JSON_BATCH_SIZE)
            .build_decoder()?;

        let mut batches = Vec::with_capacity(rows.len() / JSON_BATCH_SIZE + 1);
        for chunk in rows.chunks(JSON_BATCH_SIZE) {
            decoder.serialize(chunk)?;
            if let Some(batch) = decoder.flush()? {
                batches.push(batch);
            }
        }

        Self::from_batches(schema, &batches)
    }

    /// The underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// The Arrow schema.
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }
}

impl From<RecordBatch> for ArrowTable {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl Table for ArrowTable {
    type Cell<'a> = ArrowCell where Self: 'a;

    fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.batch.schema().index_of(name).ok()
    }

    fn column_dtype(&self, column: usize) -> String {
        self.batch.schema().field(column).data_type().to_string()
    }

    fn cell(&self, column: usize, row: usize) -> ArrowCell {
        ArrowCell::new(self.batch.column(column).clone(), row)
    }
}

/// One slot of an Arrow array.
///
/// Holds a reference-counted handle to the array, so child cells produced by
/// [`CellValue::shape`] are cheap and independent of the parent's lifetime.
#[derive(Debug, Clone)]
pub struct ArrowCell {
    array: ArrayRef,
    row: usize,
}

impl ArrowCell {
    /// A view of `array` at `row`.
    pub fn new(array: ArrayRef, row: usize) -> Self {
        Self { array, row }
    }

    /// The Arrow data type of this slot.
    pub fn data_type(&self) -> &DataType {
        self.array.data_type()
    }

    fn elements(values: ArrayRef) -> ValueShape<Self> {
        ValueShape::Sequence(
            (0..values.len())
                .map(|i| Self::new(values.clone(), i))
                .collect(),
        )
    }
}

impl CellValue for ArrowCell {
    fn shape(&self) -> ValueShape<Self> {
        if self.is_null() {
            return ValueShape::Null;
        }

        match self.array.data_type() {
            DataType::Struct(_) => {
                let array = self.array.as_struct();
                // A null child is how a unified schema encodes a key the row
                // never had, so it is not reported as present.
                let entries = array
                    .column_names()
                    .into_iter()
                    .zip(array.columns())
                    .map(|(name, child)| (name, Self::new(child.clone(), self.row)))
                    .filter(|(_, cell)| !cell.is_null())
                    .map(|(name, cell)| (name.to_string(), cell))
                    .collect();
                ValueShape::Mapping(entries)
            }
            DataType::Map(_, _) => {
                let entries = self.array.as_map().value(self.row);
                let keys = entries.column(0);
                let values = entries.column(1);
                ValueShape::Mapping(
                    (0..entries.len())
                        .map(|i| {
                            let key = Self::new(keys.clone(), i).render();
                            (key, Self::new(values.clone(), i))
                        })
                        .collect(),
                )
            }
            DataType::List(_) => Self::elements(self.array.as_list::<i32>().value(self.row)),
            DataType::LargeList(_) => Self::elements(self.array.as_list::<i64>().value(self.row)),
            DataType::FixedSizeList(_, _) => {
                Self::elements(self.array.as_fixed_size_list().value(self.row))
            }
            _ => ValueShape::Scalar,
        }
    }

    fn render(&self) -> String {
        array_value_to_string(self.array.as_ref(), self.row)
            .unwrap_or_else(|e| format!("<unrenderable: {e}>"))
    }

    fn is_null(&self) -> bool {
        // `NullArray` carries no validity buffer, so `is_null` alone misses it.
        self.array.data_type() == &DataType::Null || self.array.is_null(self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::Field;
    use serde_json::json;

    fn keys_of(cell: &ArrowCell) -> Vec<String> {
        match cell.shape() {
            ValueShape::Mapping(entries) => entries.into_iter().map(|(k, _)| k).collect(),
            other => panic!("expected mapping, got {}", other.kind()),
        }
    }

    #[test]
    fn test_scalar_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("Alice"), None])),
            ],
        )
        .unwrap();
        let table = ArrowTable::new(batch);

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column_names(), vec!["id", "name"]);
        assert_eq!(table.column_index("name"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        assert_eq!(table.column_dtype(0), "Int64");

        let cell = table.cell(1, 0);
        assert!(matches!(cell.shape(), ValueShape::Scalar));
        assert_eq!(cell.render(), "Alice");
        assert!(table.cell(1, 1).is_null());
    }

    #[test]
    fn test_struct_fields_in_schema_order() {
        let rows = vec![json!({"user": {"name": "Alice", "id": 100}, "tags": ["a", "b"]})];
        let table = ArrowTable::from_json_rows(&rows).unwrap();

        let user = table.cell(table.column_index("user").unwrap(), 0);
        assert_eq!(keys_of(&user), vec!["name", "id"]);

        let tags = table.cell(table.column_index("tags").unwrap(), 0);
        match tags.shape() {
            ValueShape::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].render(), "b");
            }
            other => panic!("expected sequence, got {}", other.kind()),
        }
    }

    #[test]
    fn test_missing_struct_keys_are_absent() {
        let rows = vec![json!({"a": {"b": 1}}), json!({"a": {"c": 2}})];
        let table = ArrowTable::from_json_rows(&rows).unwrap();
        let column = table.column_index("a").unwrap();

        assert_eq!(keys_of(&table.cell(column, 0)), vec!["b"]);
        assert_eq!(keys_of(&table.cell(column, 1)), vec!["c"]);
    }

    #[test]
    fn test_from_json_rows_spans_batches() {
        let rows: Vec<Value> = (0..2500).map(|i| json!({"key": format!("value_{i}")})).collect();
        let table = ArrowTable::from_json_rows(&rows).unwrap();

        assert_eq!(table.num_rows(), 2500);
        assert_eq!(table.cell(0, 2499).render(), "value_2499");
    }

    #[test]
    fn test_all_null_field_is_null() {
        let rows = vec![json!({"a": null, "b": {"c": null, "d": 1}})];
        let table = ArrowTable::from_json_rows(&rows).unwrap();

        assert!(table.cell(table.column_index("a").unwrap(), 0).is_null());
        assert_eq!(keys_of(&table.cell(table.column_index("b").unwrap(), 0)), vec!["d"]);
    }

    #[test]
    fn test_empty_table() {
        let table = ArrowTable::empty();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 0);
        assert!(ArrowTable::from_json_rows(&[]).unwrap().column_names().is_empty());
    }
}
