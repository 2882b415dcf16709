//! Integration tests for the overview and column reporters.

use term_inspect::formatters::{HumanFormatter, JsonFormatter, OutputFormat};
use term_inspect::prelude::*;
use term_inspect::reporters::{
    print_column, print_overview, write_column_report, write_overview_report, ColumnReporter,
    OverviewReporter,
};
use term_inspect::test_fixtures::{
    empty_arrow, nested_list_json, nested_users_arrow, nested_users_json, simple_arrow,
    simple_json, trace_table_json,
};

fn overview_text<T: Table>(table: &T) -> String {
    let mut out = Vec::new();
    print_overview(table, &InspectConfig::default(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn column_text<T: Table>(table: &T, column: &str, config: &InspectConfig) -> String {
    let mut out = Vec::new();
    print_column(table, column, config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_overview_of_nested_table() {
    for text in [
        overview_text(&nested_users_json()),
        overview_text(&nested_users_arrow()),
    ] {
        assert!(text.contains("TABLE OVERVIEW"));
        assert!(text.contains("Rows: 3"));
        assert!(text.contains("Columns: 3"));
        assert!(text.contains("Simple Columns (2)"));
        assert!(text.contains("Nested Columns (1)"));
        assert!(text.contains("   - nested: "));
    }
}

#[test]
fn test_overview_of_scalar_tables() {
    for text in [overview_text(&simple_arrow()), overview_text(&simple_json())] {
        assert!(text.contains("Simple Columns (2)"));
        assert!(!text.contains("Nested Columns"));
    }
}

#[test]
fn test_overview_of_empty_table() {
    let text = overview_text(&empty_arrow());
    assert!(text.contains("Rows: 0"));
    assert!(text.contains("Columns: 0"));
    assert!(!text.contains("Simple Columns"));
    assert!(!text.contains("Nested Columns"));
}

#[test]
fn test_column_report_text() {
    let text = column_text(&nested_list_json(), "data", &InspectConfig::default());
    assert!(text.contains("Nested Column: 'data'"));
    assert!(text.contains("items[0].id"));
    assert!(text.contains("Max depth: 3"));
}

#[test]
fn test_column_report_respects_configured_depth() {
    let config = InspectConfig::default().with_discovery(DiscoveryConfig::new(3, 1));
    let text = column_text(&nested_users_json(), "nested", &config);
    assert!(text.contains("Keys (2)"));
    assert!(!text.contains("user.name"));
}

#[test]
fn test_missing_column_is_printed_not_raised() {
    let text = column_text(&nested_users_arrow(), "missing", &InspectConfig::default());
    assert!(text.contains("not found"));
    assert!(text.contains("Column 'missing' not found"));
}

#[test]
fn test_reports_for_trace_payloads() {
    let table = trace_table_json();

    let overview = OverviewReporter::default().report(&table);
    assert_eq!(overview.simple_count(), 1);
    assert_eq!(overview.nested_count(), 2);
    assert_eq!(overview.nested_columns[0].name, "request");
    assert_eq!(overview.nested_columns[0].top_level_keys, vec!["query", "context"]);

    let report = ColumnReporter::new(DiscoveryConfig::new(3, 4))
        .report(&table, "response")
        .unwrap();
    let sources = report
        .keys
        .iter()
        .find(|k| k.path == "metadata.sources[0]")
        .unwrap();
    assert_eq!(sources.example, "policy_doc_1");
    assert_eq!(sources.row, 0);
    assert_eq!(sources.indent, 2);
}

#[test]
fn test_json_output_round_trips_through_serde() {
    let table = nested_users_json();
    let config = InspectConfig::default();
    let formatter = JsonFormatter::new();

    let mut out = Vec::new();
    write_overview_report(&table, &config, &formatter, &mut out).unwrap();
    let overview: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(overview["rows"], 3);
    assert_eq!(overview["nested_columns"][0]["name"], "nested");

    let mut out = Vec::new();
    write_column_report(&table, "missing", &config, &formatter, &mut out).unwrap();
    let missing: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(missing["column"], "missing");
    assert_eq!(missing["available_columns"][2], "nested");
}

#[test]
fn test_human_and_selected_formatters_agree() {
    let report = OverviewReporter::default().report(&nested_users_json());
    let direct = HumanFormatter::new().format_overview(&report).unwrap();
    let selected = OutputFormat::Human
        .formatter(FormatterConfig::default())
        .format_overview(&report)
        .unwrap();
    assert_eq!(direct, selected);
}
