//! Property-based tests for key discovery.
//!
//! Values are generated as arbitrary JSON trees whose keys never contain `.`
//! or `[`, so the depth of a path can be read back from its separators.

use proptest::prelude::*;
use serde_json::{Map, Value};
use term_inspect::discovery::path::path_depth;
use term_inspect::discovery::{discover_keys, DiscoveryConfig, KeyDiscovery, KeySet};
use term_inspect::table::JsonTable;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-d]{1,2}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn column(values: Vec<Value>) -> JsonTable {
    JsonTable::from_columns(vec![("col", values)]).unwrap()
}

fn keys(table: &JsonTable, sample_size: usize, max_depth: usize) -> KeySet {
    discover_keys(table, "col", DiscoveryConfig::new(sample_size, max_depth)).unwrap()
}

proptest! {
    #[test]
    fn prop_paths_respect_max_depth(
        values in prop::collection::vec(arb_json(), 0..6),
        max_depth in 0usize..6,
    ) {
        let table = column(values);
        for path in keys(&table, 6, max_depth).iter() {
            prop_assert!(path_depth(path) <= max_depth, "{} deeper than {}", path, max_depth);
        }
    }

    #[test]
    fn prop_discovery_is_idempotent(values in prop::collection::vec(arb_json(), 0..6)) {
        let table = column(values);
        let engine = KeyDiscovery::default();
        prop_assert_eq!(
            engine.discover(&table, "col").unwrap(),
            engine.discover(&table, "col").unwrap()
        );
    }

    #[test]
    fn prop_result_is_union_of_single_samples(values in prop::collection::vec(arb_json(), 0..6)) {
        let table = column(values.clone());
        let combined = keys(&table, values.len(), 3);

        let mut union = KeySet::new();
        for value in values {
            union.extend_from(&keys(&column(vec![value]), 1, 3));
        }
        prop_assert_eq!(combined, union);
    }

    #[test]
    fn prop_lower_depth_is_a_prefix_filter(
        values in prop::collection::vec(arb_json(), 0..6),
        max_depth in 1usize..5,
    ) {
        let table = column(values);
        let shallow = keys(&table, 6, max_depth).into_vec();
        let deeper: Vec<String> = keys(&table, 6, max_depth + 1)
            .into_iter()
            .filter(|p| path_depth(p) <= max_depth)
            .collect();
        prop_assert_eq!(shallow, deeper);
    }

    #[test]
    fn prop_sample_never_exceeds_size(
        values in prop::collection::vec(arb_json(), 0..20),
        sample_size in 0usize..8,
    ) {
        let table = column(values);
        let engine = KeyDiscovery::builder().sample_size(sample_size).build();
        let sample = engine.sample(&table, "col").unwrap();
        prop_assert!(sample.len() <= sample_size);
        prop_assert!(sample.values.iter().all(|s| !s.value.is_null()));
    }

    #[test]
    fn prop_all_null_column_has_no_keys(rows in 0usize..50) {
        let table = column(vec![Value::Null; rows]);
        prop_assert!(keys(&table, 3, 3).is_empty());
    }
}
