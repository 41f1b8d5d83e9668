use deepeq_core::errors::{AccessError, EngineError, EngineErrorKind};
use deepeq_core::{compare, ComparisonConfig, FieldLookup, Record};

#[test]
fn test_configuration_errors_verifiable_by_kind() {
    let err = ComparisonConfig::builder()
        .ignore_fields_matching(["[unclosed"])
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), EngineErrorKind::InvalidPattern);
    assert_eq!(err.code(), "ERR_INVALID_PATTERN");
    assert_eq!(err.op(), Some("ignore_fields_matching"));
    assert!(err.message().contains("[unclosed"));
}

#[test]
fn test_blank_field_name_is_invalid() {
    let err = ComparisonConfig::builder()
        .compare_only_fields([""])
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), EngineErrorKind::InvalidFieldName);
    assert_eq!(err.op(), Some("compare_only_fields"));
}

#[test]
fn test_conflicting_selection_lists_every_conflict() {
    let err = ComparisonConfig::builder()
        .ignore_fields(["b", "a"])
        .compare_only_fields(["a", "b", "c"])
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), EngineErrorKind::ConflictingFieldSelection);
    assert_eq!(
        err.candidates(),
        Some(&["a".to_string(), "b".to_string()][..])
    );
}

#[test]
fn test_access_error_maps_to_field_access_denied() {
    let err: EngineError = AccessError::Failed {
        field: "balance".into(),
        reason: "ledger offline".into(),
    }
    .into();

    assert_eq!(err.kind(), EngineErrorKind::FieldAccessDenied);
    assert_eq!(err.code(), "ERR_FIELD_ACCESS_DENIED");
    assert_eq!(err.op(), Some("read_field"));
    assert!(err.message().contains("ledger offline"));
}

#[test]
fn test_comparison_errors_are_not_configuration_errors() {
    let actual = Record::builder("Person")
        .field("full_name", "Luke")
        .field("fullName", "Luke")
        .build_value();
    let expected = Record::builder("Person")
        .field("full-name", "Luke")
        .build_value();
    let config = ComparisonConfig::builder()
        .field_lookup(FieldLookup::CaseStyleInsensitive)
        .build()
        .unwrap();

    let err = compare(&actual, &expected, &config).unwrap_err();
    assert_eq!(err.kind(), EngineErrorKind::AmbiguousFieldName);
    assert!(!err.kind().is_configuration_error());
    assert_eq!(err.path(), Some("full-name"));

    let text = err.to_string();
    assert!(text.starts_with("[ERR_AMBIGUOUS_FIELD_NAME]"));
    assert!(text.contains("(candidates: full_name, fullName)"));
}
