//! Common test fixtures for key discovery scenarios.
//!
//! Each scenario comes in both table flavours: `*_json` builds a
//! [`JsonTable`] and `*_arrow` builds an [`ArrowTable`] from the same rows, so
//! tests can check that the adapters agree. The data is fixed, so the
//! constructors panic instead of returning errors.

use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde_json::{json, Value};

use crate::table::{ArrowTable, JsonTable};

/// Rows with `id`, `name` and a `nested` column of user records.
pub fn nested_users_rows() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Alice",
            "nested": {"user": {"name": "Alice", "id": 100}, "metadata": {"created": "2024-01-01"}},
        }),
        json!({
            "id": 2,
            "name": "Bob",
            "nested": {"user": {"name": "Bob", "id": 200}, "metadata": {"created": "2024-01-02"}},
        }),
        json!({
            "id": 3,
            "name": "Charlie",
            "nested": {"user": {"name": "Charlie", "id": 300}, "metadata": {"created": "2024-01-03"}},
        }),
    ]
}

pub fn nested_users_json() -> JsonTable {
    JsonTable::from_rows(nested_users_rows()).expect("fixture rows are objects")
}

pub fn nested_users_arrow() -> ArrowTable {
    ArrowTable::from_json_rows(&nested_users_rows()).expect("fixture rows share a schema")
}

/// Rows with a `data` column holding a list of item records.
pub fn nested_list_rows() -> Vec<Value> {
    vec![
        json!({"data": {"items": [{"id": 1}, {"id": 2}]}}),
        json!({"data": {"items": [{"id": 3}]}}),
    ]
}

pub fn nested_list_json() -> JsonTable {
    JsonTable::from_rows(nested_list_rows()).expect("fixture rows are objects")
}

pub fn nested_list_arrow() -> ArrowTable {
    ArrowTable::from_json_rows(&nested_list_rows()).expect("fixture rows share a schema")
}

/// Three rows of scalar columns `a` (integers) and `b` (strings).
pub fn simple_arrow() -> ArrowTable {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Int64, false),
        Field::new("b", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec!["x", "y", "z"])),
        ],
    )
    .expect("columns match the schema");
    ArrowTable::new(batch)
}

pub fn simple_json() -> JsonTable {
    JsonTable::from_rows(vec![
        json!({"a": 1, "b": "x"}),
        json!({"a": 2, "b": "y"}),
        json!({"a": 3, "b": "z"}),
    ])
    .expect("fixture rows are objects")
}

/// No rows and no columns.
pub fn empty_arrow() -> ArrowTable {
    ArrowTable::empty()
}

pub fn empty_json() -> JsonTable {
    JsonTable::new()
}

/// `rows` rows of `{"data": {"key": "value_<i>"}}`.
pub fn key_value_rows(rows: usize) -> Vec<Value> {
    (0..rows)
        .map(|i| json!({"data": {"key": format!("value_{i}")}}))
        .collect()
}

pub fn key_value_json(rows: usize) -> JsonTable {
    JsonTable::from_rows(key_value_rows(rows)).expect("fixture rows are objects")
}

pub fn key_value_arrow(rows: usize) -> ArrowTable {
    ArrowTable::from_json_rows(&key_value_rows(rows)).expect("fixture rows share a schema")
}

/// Model-serving traces with request and response payloads.
///
/// `response.metadata.sources` holds a string in the first row and objects in
/// the others, so only the schemaless table can hold it.
pub fn trace_rows() -> Vec<Value> {
    vec![
        json!({
            "trace_id": "trace_001",
            "request": {"query": "What is my deductible?", "context": {"user_id": "123", "session": "abc"}},
            "response": {
                "answer": "Your deductible is $500",
                "metadata": {"confidence": 0.95, "sources": ["policy_doc_1"]},
            },
        }),
        json!({
            "trace_id": "trace_002",
            "request": {"query": "Find doctors near me", "context": {"user_id": "456", "session": "def"}},
            "response": {
                "answer": "Here are nearby doctors...",
                "metadata": {"confidence": 0.87, "sources": [{"db": "provider_db"}]},
            },
        }),
        json!({
            "trace_id": "trace_003",
            "request": {"query": "Check my claims", "context": {"user_id": "789", "session": "ghi"}},
            "response": {
                "answer": "Your recent claims...",
                "metadata": {"confidence": 0.92, "sources": [{"db": "claims_db"}]},
            },
        }),
    ]
}

pub fn trace_table_json() -> JsonTable {
    JsonTable::from_rows(trace_rows()).expect("fixture rows are objects")
}

/// `rows` rows of `id` plus a `nested` column of user, metadata and tags,
/// used to measure discovery against table size.
pub fn generate_nested_rows(rows: usize) -> Vec<Value> {
    (0..rows)
        .map(|i| {
            json!({
                "id": i,
                "nested": {
                    "user": {"name": format!("User{i}"), "id": i, "email": format!("user{i}@example.com")},
                    "metadata": {"timestamp": format!("2024-01-{:02}", (i % 28) + 1), "version": "1.0"},
                    "tags": ["tag1", "tag2", "tag3"],
                },
            })
        })
        .collect()
}
