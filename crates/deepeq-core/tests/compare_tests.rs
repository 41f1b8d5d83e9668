#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{address, person, self_loop, two_cycle};
use deepeq_core::{
    are_equal, compare, compare_values, ComparisonConfig, DifferenceKind, Record, Value,
};

#[test]
fn test_equal_graphs_have_no_differences() {
    let report = compare(
        &person("Yoda", 800, "Dagobah"),
        &person("Yoda", 800, "Dagobah"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_nested_difference_names_full_path() {
    let report = compare(
        &person("Yoda", 800, "Coruscant"),
        &person("Yoda", 800, "Dagobah"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.len(), 1);
    let diff = &report.differences()[0];
    assert_eq!(diff.path().to_string(), "address.city");
    assert_eq!(diff.kind(), DifferenceKind::ValueMismatch);
    assert_eq!(diff.actual(), Some(&Value::str("Coruscant")));
    assert_eq!(diff.expected(), Some(&Value::str("Dagobah")));
}

#[test]
fn test_differences_follow_declaration_order() {
    let report = compare(
        &person("Luke", 19, "Tatooine"),
        &person("Yoda", 800, "Dagobah"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.paths(), vec!["name", "age", "address.city"]);
}

#[test]
fn test_both_null_is_equal() {
    assert!(are_equal(&Value::Null, &Value::Null, &ComparisonConfig::default()).unwrap());
}

#[test]
fn test_one_side_null_is_one_difference_either_way() {
    let config = ComparisonConfig::default();
    let x = person("Yoda", 800, "Dagobah");

    let left = compare(&Value::Null, &x, &config).unwrap();
    let right = compare(&x, &Value::Null, &config).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 1);
    assert_eq!(left.differences()[0].kind(), DifferenceKind::UnexpectedNull);
    assert_eq!(right.differences()[0].kind(), DifferenceKind::UnexpectedNull);
    assert!(left.differences()[0].path().is_root());
}

#[test]
fn test_null_field_reported_once_without_descending() {
    let actual = Record::builder("Person")
        .field("name", "Yoda")
        .field("address", Value::Null)
        .build_value();
    let expected = person("Yoda", 800, "Dagobah");
    let config = ComparisonConfig::builder()
        .ignore_fields(["age"])
        .build()
        .unwrap();
    let report = compare(&actual, &expected, &config).unwrap();
    assert_eq!(report.paths(), vec!["address"]);
    assert_eq!(report.differences()[0].kind(), DifferenceKind::UnexpectedNull);
}

#[test]
fn test_null_reported_as_value_mismatch_when_configured() {
    let config = ComparisonConfig::builder()
        .report_null_as_value_mismatch(true)
        .build()
        .unwrap();
    let report = compare(&Value::Null, &Value::Int(1), &config).unwrap();
    assert_eq!(report.differences()[0].kind(), DifferenceKind::ValueMismatch);
}

#[test]
fn test_sequence_size_mismatch_at_root() {
    let report = compare(
        &Value::seq([1, 2, 3]),
        &Value::seq([1, 2]),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.len(), 1);
    let diff = &report.differences()[0];
    assert_eq!(diff.kind(), DifferenceKind::SizeMismatch);
    assert!(diff.path().is_root());
    assert_eq!(diff.description(), Some("actual size: 3, expected size: 2"));
}

#[test]
fn test_map_key_missing_in_actual() {
    let report = compare(
        &Value::map([("a", 1)]),
        &Value::map([("a", 1), ("b", 2)]),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.len(), 1);
    let diff = &report.differences()[0];
    assert_eq!(diff.kind(), DifferenceKind::MissingFieldInActual);
    assert_eq!(diff.path().to_string(), "key(\"b\")");
    assert!(diff.actual().is_none());
    assert_eq!(diff.expected(), Some(&Value::Int(2)));
}

#[test]
fn test_map_key_path_under_field() {
    let actual = Record::builder("Holder")
        .field("map", Value::map([("a", 1)]))
        .build_value();
    let expected = Record::builder("Holder")
        .field("map", Value::map([("a", 1), ("b", 2)]))
        .build_value();
    let report = compare(&actual, &expected, &ComparisonConfig::default()).unwrap();
    assert_eq!(report.paths(), vec!["map.key(\"b\")"]);
}

#[test]
fn test_self_referencing_graphs_terminate() {
    let report = compare(
        &self_loop("a"),
        &self_loop("a"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert!(report.is_empty());

    let report = compare(
        &self_loop("a"),
        &self_loop("b"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.paths(), vec!["name"]);
}

#[test]
fn test_mutually_referencing_graphs_terminate() {
    let report = compare(
        &two_cycle("a", "b"),
        &two_cycle("a", "c"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.paths(), vec!["next.name"]);
}

#[test]
fn test_shared_substructure_compared_in_each_branch() {
    let shared_actual = address("1 Main St", "Naboo");
    let shared_expected = address("1 Main St", "Tatooine");
    let actual = Record::builder("Couple")
        .field("home", shared_actual.clone())
        .field("work", shared_actual)
        .build_value();
    let expected = Record::builder("Couple")
        .field("home", shared_expected.clone())
        .field("work", shared_expected)
        .build_value();
    let report = compare(&actual, &expected, &ComparisonConfig::default()).unwrap();
    assert_eq!(report.paths(), vec!["home.city", "work.city"]);
}

#[test]
fn test_identical_reference_short_circuits() {
    let x = person("Yoda", 800, "Dagobah");
    assert!(are_equal(&x, &x.clone(), &ComparisonConfig::default()).unwrap());
}

#[test]
fn test_different_container_kinds_are_type_mismatch() {
    let report = compare(
        &Value::seq([1]),
        &Value::set([1]),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.differences()[0].kind(), DifferenceKind::TypeMismatch);

    let report = compare(
        &person("Yoda", 800, "Dagobah"),
        &Value::seq([1]),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.differences()[0].kind(), DifferenceKind::TypeMismatch);
}

#[test]
fn test_fields_only_in_actual_are_reported_last() {
    let actual = Record::builder("Person")
        .field("nickname", "Master")
        .field("name", "Yoda")
        .build_value();
    let expected = Record::builder("Person")
        .field("name", "Yoda")
        .field("title", "Jedi")
        .build_value();
    let report = compare(&actual, &expected, &ComparisonConfig::default()).unwrap();
    assert_eq!(report.paths(), vec!["title", "nickname"]);
    assert_eq!(
        report.differences()[0].kind(),
        DifferenceKind::MissingFieldInActual
    );
    assert_eq!(
        report.differences()[1].kind(),
        DifferenceKind::MissingFieldInExpected
    );
}

#[test]
fn test_leaf_types_differ_without_strict_checking() {
    let report = compare(
        &Value::Int(1),
        &Value::Float(1.0),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert_eq!(report.differences()[0].kind(), DifferenceKind::ValueMismatch);
}

#[test]
fn test_compare_values_accepts_std_types() {
    let report =
        compare_values(&vec![1, 2, 3], &vec![1, 2, 4], &ComparisonConfig::default()).unwrap();
    assert_eq!(report.paths(), vec!["[2]"]);
}

#[test]
fn test_hash_map_differences_are_reported_in_stable_order() {
    use std::collections::HashMap;
    let actual: HashMap<String, i32> = (0..8).map(|i| (format!("k{i}"), i)).collect();
    let expected: HashMap<String, i32> = (0..8).map(|i| (format!("k{i}"), i + 100)).collect();
    let config = ComparisonConfig::default();

    let first = compare_values(&actual, &expected, &config).unwrap().paths();
    assert_eq!(first.len(), 8);
    assert_eq!(first[0], "key(\"k0\")");
    for _ in 0..20 {
        let rebuilt: HashMap<String, i32> = actual.clone().into_iter().collect();
        let again = compare_values(&rebuilt, &expected, &config).unwrap().paths();
        assert_eq!(again, first);
    }
}

#[test]
fn test_structurally_equal_map_keys_are_paired() {
    let key = || Record::builder("Key").field("id", "x").build_value();
    let report = compare(
        &Value::map([(Value::seq([1, 2]), 1), (key(), 2)]),
        &Value::map([(Value::seq([1, 2]), 1), (key(), 2)]),
        &ComparisonConfig::default(),
    )
    .unwrap();
    assert!(report.is_empty(), "unexpected differences: {:?}", report.paths());
}

#[test]
fn test_rendered_report_describes_each_difference() {
    use deepeq_core::StandardRepresentation;
    let report = compare(
        &person("Yoda", 800, "Coruscant"),
        &person("Yoda", 800, "Dagobah"),
        &ComparisonConfig::default(),
    )
    .unwrap();
    let text = report.render(&StandardRepresentation::new());
    assert!(text.starts_with("The following 1 difference(s) were found:"));
    assert!(text.contains("field/property 'address.city' differ"));
    assert!(text.contains("- expected value: \"Dagobah\""));
}
