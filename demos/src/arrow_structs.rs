//! Example: key discovery over Arrow struct, list and map columns.
//!
//! Builds a record batch by hand, then shows the discovered paths both as a
//! plain key set and as JSON output.

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Int64Array, Int64Builder, ListArray, MapBuilder, StringArray, StringBuilder,
    StructArray,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Int64Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use term_inspect::formatters::{JsonFormatter, OutputFormat};
use term_inspect::prelude::*;
use term_inspect::reporters::{print_column, print_overview, write_column_report, OverviewReporter};
use term_inspect_demos::{init_demo_logging, print_banner, print_step};

/// `order` struct: customer name plus a list of line quantities.
fn order_column() -> ArrayRef {
    let customer = Arc::new(StringArray::from(vec![Some("Alice"), Some("Bob"), None])) as ArrayRef;
    let lines = Arc::new(ListArray::from_iter_primitive::<Int64Type, _, _>(vec![
        Some(vec![Some(2), Some(1)]),
        Some(vec![Some(5)]),
        None,
    ])) as ArrayRef;

    let fields = Fields::from(vec![
        Field::new("customer", DataType::Utf8, true),
        Field::new("lines", lines.data_type().clone(), true),
    ]);
    Arc::new(StructArray::new(fields, vec![customer, lines], None))
}

/// `labels` map from label name to weight.
fn labels_column() -> std::result::Result<ArrayRef, ArrowError> {
    let mut builder = MapBuilder::new(None, StringBuilder::new(), Int64Builder::new());
    for entries in [vec![("priority", 1), ("region", 7)], vec![], vec![("priority", 3)]] {
        for (key, weight) in entries {
            builder.keys().append_value(key);
            builder.values().append_value(weight);
        }
        builder.append(true)?;
    }
    Ok(Arc::new(builder.finish()))
}

fn tags_column() -> ArrayRef {
    let values = Arc::new(StringArray::from(vec!["new", "gift", "bulk"]));
    let field = Arc::new(Field::new("item", DataType::Utf8, true));
    Arc::new(ListArray::new(
        field,
        OffsetBuffer::from_lengths([2, 0, 1]),
        values,
        None,
    ))
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_demo_logging()?;

    let batch = RecordBatch::try_from_iter(vec![
        ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
        ("order", order_column()),
        ("labels", labels_column()?),
        ("tags", tags_column()),
    ])?;
    let table = ArrowTable::new(batch);
    let config = InspectConfig::default();
    let mut out = io::stdout();

    print_banner("Arrow Struct Inspection Example");

    print_step("📋 Overview");
    print_overview(&table, &config, &mut out)?;

    print_step("🔑 Key set of 'order'");
    for path in KeyDiscovery::default().discover(&table, "order")?.iter() {
        println!("  {path}");
    }

    print_step("🔍 Map column 'labels'");
    print_column(&table, "labels", &config, &mut out)?;

    print_step("🧾 'order' as JSON");
    let formatter = JsonFormatter::with_config(FormatterConfig::minimal());
    write_column_report(&table, "order", &config, &formatter, &mut out)?;

    print_step("📄 Overview as JSON");
    let report = OverviewReporter::default().report(&table);
    let text = OutputFormat::Json
        .formatter(FormatterConfig::default())
        .format_overview(&report)?;
    out.write_all(text.as_bytes())?;

    Ok(())
}
