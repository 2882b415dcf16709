//! Schemaless table adapter over `serde_json` values.

use std::collections::HashMap;
use std::io::BufRead;

use serde_json::{Map, Value};

use super::{CellValue, Table, ValueShape};
use crate::prelude::*;

/// A column-major table of JSON values.
///
/// Unlike [`ArrowTable`](super::ArrowTable), cells keep whatever shape they were
/// given: one row may hold a list of strings where the next holds a list of
/// objects. Missing keys are stored as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonTable {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
    num_rows: usize,
}

impl JsonTable {
    /// A table with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from named columns of equal length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (index, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if index == 0 {
                table.num_rows = values.len();
            } else if values.len() != table.num_rows {
                return Err(InspectError::data_source(
                    "JSON",
                    format!(
                        "column '{name}' has {} values, expected {}",
                        values.len(),
                        table.num_rows
                    ),
                ));
            }
            if table.names.contains(&name) {
                return Err(InspectError::data_source(
                    "JSON",
                    format!("duplicate column '{name}'"),
                ));
            }
            table.names.push(name);
            table.columns.push(values);
        }
        Ok(table)
    }

    /// Builds a table from JSON objects, one per row.
    ///
    /// Columns appear in the order their keys are first seen.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut table = Self::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (row, value) in rows.into_iter().enumerate() {
            let object = match value {
                Value::Object(object) => object,
                other => {
                    return Err(InspectError::data_source(
                        "JSON",
                        format!("row {row} is not an object: {}", kind_of(&other)),
                    ))
                }
            };
            table.push_row(object, &mut positions);
        }

        Ok(table)
    }

    /// Reads newline-delimited JSON. Blank lines are skipped.
    pub fn from_ndjson_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line).map_err(|e| {
                InspectError::data_source_with_source(
                    "NDJSON",
                    format!("invalid JSON on line {}", line_number + 1),
                    Box::new(e),
                )
            })?;
            rows.push(value);
        }
        Self::from_rows(rows)
    }

    /// Parses either a JSON array of objects or newline-delimited objects.
    pub fn from_json_str(text: &str) -> Result<Self> {
        if text.trim_start().starts_with('[') {
            match serde_json::from_str::<Value>(text)? {
                Value::Array(rows) => Self::from_rows(rows),
                other => Err(InspectError::data_source(
                    "JSON",
                    format!("expected an array of rows, found {}", kind_of(&other)),
                )),
            }
        } else {
            Self::from_ndjson_reader(text.as_bytes())
        }
    }

    fn push_row(&mut self, object: Map<String, Value>, positions: &mut HashMap<String, usize>) {
        for (key, value) in object {
            let index = *positions.entry(key.clone()).or_insert_with(|| {
                self.names.push(key);
                self.columns.push(vec![Value::Null; self.num_rows]);
                self.columns.len() - 1
            });
            self.columns[index].push(value);
        }
        self.num_rows += 1;
        for column in &mut self.columns {
            if column.len() < self.num_rows {
                column.push(Value::Null);
            }
        }
    }
}

impl Table for JsonTable {
    type Cell<'a> = &'a Value where Self: 'a;

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn num_columns(&self) -> usize {
        self.names.len()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Reports the JSON kind shared by all non-null values, `mixed` when they
    /// differ and `null` when there are none.
    fn column_dtype(&self, column: usize) -> String {
        let mut kinds = self.columns[column]
            .iter()
            .filter(|v| !v.is_null())
            .map(kind_of);
        match kinds.next() {
            None => "null".to_string(),
            Some(first) if kinds.all(|k| k == first) => first.to_string(),
            Some(_) => "mixed".to_string(),
        }
    }

    fn cell(&self, column: usize, row: usize) -> &Value {
        &self.columns[column][row]
    }
}

impl<'a> CellValue for &'a Value {
    fn shape(&self) -> ValueShape<Self> {
        match *self {
            Value::Object(map) => {
                ValueShape::Mapping(map.iter().map(|(k, v)| (k.clone(), v)).collect())
            }
            Value::Array(items) => ValueShape::Sequence(items.iter().collect()),
            Value::Null => ValueShape::Null,
            _ => ValueShape::Scalar,
        }
    }

    fn render(&self) -> String {
        match *self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn is_null(&self) -> bool {
        Value::is_null(*self)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_rows_fills_missing_keys() {
        let table = JsonTable::from_rows(vec![
            json!({"id": 1, "payload": {"a": 1}}),
            json!({"id": 2, "extra": true}),
        ])
        .unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column_names(), vec!["id", "payload", "extra"]);
        assert!(table.cell(1, 1).is_null());
        assert!(table.cell(2, 0).is_null());
        assert_eq!(table.cell(2, 1), &json!(true));
    }

    #[test]
    fn test_from_rows_rejects_non_objects() {
        let err = JsonTable::from_rows(vec![json!({"id": 1}), json!([1, 2])]).unwrap_err();
        assert!(err.to_string().contains("row 1 is not an object"));
    }

    #[test]
    fn test_from_columns_checks_lengths() {
        let err = JsonTable::from_columns(vec![
            ("a", vec![json!(1), json!(2)]),
            ("b", vec![json!(1)]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("column 'b' has 1 values"));
    }

    #[test]
    fn test_mapping_keeps_key_order() {
        let value = json!({"zeta": 1, "alpha": {"x": null}, "mid": [1, {"k": 2}]});
        let cell = &value;
        let keys: Vec<String> = match cell.shape() {
            ValueShape::Mapping(entries) => entries.into_iter().map(|(k, _)| k).collect(),
            other => panic!("expected mapping, got {}", other.kind()),
        };
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_column_dtype() {
        let table = JsonTable::from_columns(vec![
            ("objects", vec![json!({"a": 1}), Value::Null]),
            ("mixed", vec![json!("x"), json!(1)]),
            ("empty", vec![Value::Null, Value::Null]),
        ])
        .unwrap();

        assert_eq!(table.column_dtype(0), "object");
        assert_eq!(table.column_dtype(1), "mixed");
        assert_eq!(table.column_dtype(2), "null");
    }

    #[test]
    fn test_from_json_str_accepts_array_and_ndjson() {
        let array = JsonTable::from_json_str(r#"[{"a": 1}, {"a": 2}]"#).unwrap();
        let lines = JsonTable::from_json_str("{\"a\": 1}\n\n{\"a\": 2}\n").unwrap();
        assert_eq!(array, lines);
        assert_eq!(array.num_rows(), 2);
    }

    #[test]
    fn test_render_strings_unquoted() {
        let value = json!("Alice");
        assert_eq!((&value).render(), "Alice");
        let value = json!({"id": 1});
        assert_eq!((&value).render(), r#"{"id":1}"#);
    }
}
