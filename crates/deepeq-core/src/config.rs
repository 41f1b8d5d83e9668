//! Comparison configuration.
//!
//! [`ComparisonConfig`] is immutable once built and can be shared read-only
//! across threads. All validation happens eagerly in
//! [`ComparisonConfigBuilder::build`]; a built configuration never causes a
//! comparison to fail.
//!
//! Field names are matched against config paths (see
//! [`crate::path::FieldPath::config_path`]): dotted, without indices.
//! Ignoring `address` also ignores `address.city`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::errors::{EngineError, EngineErrorKind, Result};
use crate::model::Value;
use crate::report::DifferenceKind;

/// Ordering-based equality: `Ordering::Equal` means equal
pub type ComparatorFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;
/// Boolean equality predicate
pub type PredicateFn = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// A user-supplied equality mechanism
#[derive(Clone)]
pub enum EqualityCheck {
    Comparator(ComparatorFn),
    Predicate(PredicateFn),
}

impl EqualityCheck {
    pub fn are_equal(&self, actual: &Value, expected: &Value) -> bool {
        match self {
            EqualityCheck::Comparator(cmp) => cmp(actual, expected) == Ordering::Equal,
            EqualityCheck::Predicate(pred) => pred(actual, expected),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EqualityCheck::Comparator(_) => "comparator",
            EqualityCheck::Predicate(_) => "predicate",
        }
    }
}

impl fmt::Debug for EqualityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EqualityCheck::{}", self.label())
    }
}

/// How record field names are matched between actual and expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldLookup {
    /// Declared name, then property-style aliases (`name` finds `getName`,
    /// `getName` finds `name`)
    #[default]
    Exact,
    /// Names compared after removing `_`/`-` and lowercasing
    CaseStyleInsensitive,
}

/// Immutable comparison settings
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    ignored_fields: BTreeSet<String>,
    ignored_field_patterns: Vec<Regex>,
    ignored_types: BTreeSet<String>,
    compared_fields: BTreeSet<String>,
    field_checks: BTreeMap<String, EqualityCheck>,
    type_checks: Vec<(String, EqualityCheck)>,
    type_pair_checks: Vec<((String, String), EqualityCheck)>,
    treat_null_and_absent_as_equal: bool,
    strict_type_checking: bool,
    ordering_sensitive_collections: bool,
    unordered_fields: BTreeSet<String>,
    ignore_actual_null_fields: bool,
    ignore_expected_null_fields: bool,
    field_lookup: FieldLookup,
    null_mismatch_kind: DifferenceKind,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            ignored_fields: BTreeSet::new(),
            ignored_field_patterns: Vec::new(),
            ignored_types: BTreeSet::new(),
            compared_fields: BTreeSet::new(),
            field_checks: BTreeMap::new(),
            type_checks: Vec::new(),
            type_pair_checks: Vec::new(),
            treat_null_and_absent_as_equal: false,
            strict_type_checking: false,
            ordering_sensitive_collections: true,
            unordered_fields: BTreeSet::new(),
            ignore_actual_null_fields: false,
            ignore_expected_null_fields: false,
            field_lookup: FieldLookup::Exact,
            null_mismatch_kind: DifferenceKind::UnexpectedNull,
        }
    }
}

/// True when `path` is `name` or lies below it
fn is_at_or_below(path: &str, name: &str) -> bool {
    path == name
        || (path.len() > name.len()
            && path.starts_with(name)
            && path.as_bytes()[name.len()] == b'.')
}

impl ComparisonConfig {
    pub fn builder() -> ComparisonConfigBuilder {
        ComparisonConfigBuilder::default()
    }

    /// Path-based filtering: ignored names, ignored patterns, compared-only
    /// names. Evaluated before a field is read.
    pub fn is_path_ignored(&self, config_path: &str) -> bool {
        if config_path.is_empty() {
            return false;
        }
        if self
            .ignored_fields
            .iter()
            .any(|name| is_at_or_below(config_path, name))
        {
            return true;
        }
        if self
            .ignored_field_patterns
            .iter()
            .any(|pattern| pattern.is_match(config_path))
        {
            return true;
        }
        if !self.compared_fields.is_empty() {
            // Ancestors of a compared field stay visible so the walk can reach it.
            let related = self.compared_fields.iter().any(|name| {
                is_at_or_below(config_path, name) || is_at_or_below(name, config_path)
            });
            return !related;
        }
        false
    }

    /// Value-based filtering: ignored types and null-field flags. Evaluated
    /// once both sides of a field have been read.
    pub fn is_value_ignored(&self, actual: Option<&Value>, expected: Option<&Value>) -> bool {
        if self.ignore_actual_null_fields && actual.is_some_and(Value::is_null) {
            return true;
        }
        if self.ignore_expected_null_fields && expected.is_some_and(Value::is_null) {
            return true;
        }
        if self.ignored_types.is_empty() {
            return false;
        }
        [actual, expected].into_iter().flatten().any(|value| {
            value
                .type_chain()
                .iter()
                .any(|t| self.ignored_types.contains(*t))
        })
    }

    /// True when the sequence at `config_path` is compared element by element
    pub fn is_ordered(&self, config_path: &str) -> bool {
        self.ordering_sensitive_collections
            && !self
                .unordered_fields
                .iter()
                .any(|name| is_at_or_below(config_path, name))
    }

    pub fn field_check(&self, config_path: &str) -> Option<&EqualityCheck> {
        self.field_checks.get(config_path)
    }

    /// Registered field name and check for `config_path`
    pub fn field_check_entry(&self, config_path: &str) -> Option<(&str, &EqualityCheck)> {
        self.field_checks
            .get_key_value(config_path)
            .map(|(name, check)| (name.as_str(), check))
    }

    pub fn has_type_checks(&self) -> bool {
        !self.type_checks.is_empty() || !self.type_pair_checks.is_empty()
    }

    /// Single-type checks in registration order
    pub fn type_checks(&self) -> &[(String, EqualityCheck)] {
        &self.type_checks
    }

    /// `(actual type, expected type)` checks in registration order
    pub fn type_pair_checks(&self) -> &[((String, String), EqualityCheck)] {
        &self.type_pair_checks
    }

    pub fn has_custom_checks(&self) -> bool {
        !self.field_checks.is_empty()
            || !self.type_checks.is_empty()
            || !self.type_pair_checks.is_empty()
    }

    pub fn treat_null_and_absent_as_equal(&self) -> bool {
        self.treat_null_and_absent_as_equal
    }

    pub fn strict_type_checking(&self) -> bool {
        self.strict_type_checking
    }

    pub fn ordering_sensitive_collections(&self) -> bool {
        self.ordering_sensitive_collections
    }

    pub fn field_lookup(&self) -> FieldLookup {
        self.field_lookup
    }

    /// Kind recorded when exactly one side is null
    pub fn null_mismatch_kind(&self) -> DifferenceKind {
        self.null_mismatch_kind
    }

    pub fn ignored_fields(&self) -> &BTreeSet<String> {
        &self.ignored_fields
    }

    pub fn compared_fields(&self) -> &BTreeSet<String> {
        &self.compared_fields
    }
}

/// Builder for [`ComparisonConfig`]
#[derive(Default)]
pub struct ComparisonConfigBuilder {
    ignored_fields: Vec<String>,
    ignored_field_patterns: Vec<String>,
    ignored_types: Vec<String>,
    compared_fields: Vec<String>,
    field_registrations: Vec<(String, EqualityCheck)>,
    type_registrations: Vec<(String, EqualityCheck)>,
    type_pair_predicates: Vec<((String, String), PredicateFn)>,
    treat_null_and_absent_as_equal: bool,
    strict_type_checking: bool,
    ordering_insensitive: bool,
    unordered_fields: Vec<String>,
    ignore_actual_null_fields: bool,
    ignore_expected_null_fields: bool,
    field_lookup: FieldLookup,
    report_null_as_value_mismatch: bool,
}

fn collect_names<I, S>(names: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into)
}

impl ComparisonConfigBuilder {
    /// Ignore fields by dotted name; nested fields are ignored too
    pub fn ignore_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields.extend(collect_names(names));
        self
    }

    /// Ignore fields whose config path fully matches one of the regexes
    pub fn ignore_fields_matching<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_field_patterns.extend(collect_names(patterns));
        self
    }

    /// Compare only these fields (and what lies below them)
    pub fn compare_only_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compared_fields.extend(collect_names(names));
        self
    }

    /// Ignore fields whose value has one of these runtime types or supertypes
    pub fn ignore_types<I, S>(mut self, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_types.extend(collect_names(type_names));
        self
    }

    pub fn with_comparator_for_field<F>(mut self, name: impl Into<String>, comparator: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.field_registrations
            .push((name.into(), EqualityCheck::Comparator(Arc::new(comparator))));
        self
    }

    pub fn with_comparator_for_type<F>(
        mut self,
        type_name: impl Into<String>,
        comparator: F,
    ) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.type_registrations
            .push((type_name.into(), EqualityCheck::Comparator(Arc::new(comparator))));
        self
    }

    pub fn with_equals_for_field<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.field_registrations
            .push((name.into(), EqualityCheck::Predicate(Arc::new(predicate))));
        self
    }

    pub fn with_equals_for_type<F>(mut self, type_name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.type_registrations
            .push((type_name.into(), EqualityCheck::Predicate(Arc::new(predicate))));
        self
    }

    /// Predicate for an actual value of `actual_type` compared against an
    /// expected value of `expected_type`
    pub fn with_equals_for_types<F>(
        mut self,
        actual_type: impl Into<String>,
        expected_type: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.type_pair_predicates.push((
            (actual_type.into(), expected_type.into()),
            Arc::new(predicate),
        ));
        self
    }

    pub fn treat_null_and_absent_as_equal(mut self, enabled: bool) -> Self {
        self.treat_null_and_absent_as_equal = enabled;
        self
    }

    pub fn strict_type_checking(mut self, enabled: bool) -> Self {
        self.strict_type_checking = enabled;
        self
    }

    pub fn ordering_sensitive_collections(mut self, enabled: bool) -> Self {
        self.ordering_insensitive = !enabled;
        self
    }

    /// Compare the sequences at these fields ignoring element order
    pub fn ignore_collection_order_in_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unordered_fields.extend(collect_names(names));
        self
    }

    pub fn ignore_actual_null_fields(mut self, enabled: bool) -> Self {
        self.ignore_actual_null_fields = enabled;
        self
    }

    pub fn ignore_expected_null_fields(mut self, enabled: bool) -> Self {
        self.ignore_expected_null_fields = enabled;
        self
    }

    pub fn field_lookup(mut self, lookup: FieldLookup) -> Self {
        self.field_lookup = lookup;
        self
    }

    /// Report a one-sided null as a value mismatch instead of an unexpected null
    pub fn report_null_as_value_mismatch(mut self, enabled: bool) -> Self {
        self.report_null_as_value_mismatch = enabled;
        self
    }

    /// Validate and freeze the configuration
    ///
    /// # Errors
    ///
    /// - `InvalidFieldName` — a field or type name is empty or blank
    /// - `ConflictingFieldSelection` — a field is both ignored and compared-only
    /// - `DuplicateEqualityCheck` — a field or type has both a comparator and a predicate
    /// - `InvalidPattern` — an ignore pattern is not a valid regex
    pub fn build(self) -> Result<ComparisonConfig> {
        let name_groups: [(&str, Vec<&String>); 4] = [
            ("ignore_fields", self.ignored_fields.iter().collect()),
            ("compare_only_fields", self.compared_fields.iter().collect()),
            (
                "ignore_collection_order_in_fields",
                self.unordered_fields.iter().collect(),
            ),
            (
                "with_equals_for_field",
                self.field_registrations.iter().map(|(n, _)| n).collect(),
            ),
        ];
        for (op, names) in &name_groups {
            if let Some(blank) = names.iter().find(|n| n.trim().is_empty()) {
                return Err(EngineError::new(EngineErrorKind::InvalidFieldName)
                    .with_op(*op)
                    .with_message(format!("blank field name {:?} is invalid", blank)));
            }
        }
        let type_names = self
            .ignored_types
            .iter()
            .chain(self.type_registrations.iter().map(|(t, _)| t))
            .chain(
                self.type_pair_predicates
                    .iter()
                    .flat_map(|((a, e), _)| [a, e]),
            );
        for type_name in type_names {
            if type_name.trim().is_empty() {
                return Err(EngineError::new(EngineErrorKind::InvalidFieldName)
                    .with_op("with_type")
                    .with_message("blank type name is invalid"));
            }
        }

        let ignored_fields: BTreeSet<String> = self.ignored_fields.into_iter().collect();
        let compared_fields: BTreeSet<String> = self.compared_fields.into_iter().collect();
        let conflicts: Vec<String> = ignored_fields
            .intersection(&compared_fields)
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            return Err(EngineError::new(EngineErrorKind::ConflictingFieldSelection)
                .with_op("build_config")
                .with_message("fields cannot be both ignored and compared")
                .with_candidates(conflicts));
        }

        let field_checks = merge_checks(self.field_registrations, "with_equals_for_field")?
            .into_iter()
            .collect();
        let type_checks = merge_checks(self.type_registrations, "with_equals_for_type")
            .map_err(|e| {
                let type_name = e.candidates().and_then(|c| c.first()).cloned();
                match type_name {
                    Some(t) => e.with_type_name(t),
                    None => e,
                }
            })?;

        let mut ignored_field_patterns = Vec::with_capacity(self.ignored_field_patterns.len());
        for pattern in &self.ignored_field_patterns {
            let anchored = format!("^(?:{})$", pattern);
            let regex = Regex::new(&anchored).map_err(|e| {
                EngineError::new(EngineErrorKind::InvalidPattern)
                    .with_op("ignore_fields_matching")
                    .with_message(format!("invalid pattern {:?}: {}", pattern, e))
            })?;
            ignored_field_patterns.push(regex);
        }

        Ok(ComparisonConfig {
            ignored_fields,
            ignored_field_patterns,
            ignored_types: self.ignored_types.into_iter().collect(),
            compared_fields,
            field_checks,
            type_checks,
            type_pair_checks: self
                .type_pair_predicates
                .into_iter()
                .map(|(key, pred)| (key, EqualityCheck::Predicate(pred)))
                .collect(),
            treat_null_and_absent_as_equal: self.treat_null_and_absent_as_equal,
            strict_type_checking: self.strict_type_checking,
            ordering_sensitive_collections: !self.ordering_insensitive,
            unordered_fields: self.unordered_fields.into_iter().collect(),
            ignore_actual_null_fields: self.ignore_actual_null_fields,
            ignore_expected_null_fields: self.ignore_expected_null_fields,
            field_lookup: self.field_lookup,
            null_mismatch_kind: if self.report_null_as_value_mismatch {
                DifferenceKind::ValueMismatch
            } else {
                DifferenceKind::UnexpectedNull
            },
        })
    }
}

fn duplicate_check_error(op: &str, key: &str) -> EngineError {
    EngineError::new(EngineErrorKind::DuplicateEqualityCheck)
        .with_op(op)
        .with_message(format!(
            "both a comparator and a predicate are registered for '{}'",
            key
        ))
        .with_candidates(vec![key.to_string()])
}

/// Merge registrations keyed by name, keeping first-registration order.
/// A later registration of the same kind replaces an earlier one; mixing a
/// comparator and a predicate under one key is rejected.
fn merge_checks(
    registrations: Vec<(String, EqualityCheck)>,
    op: &str,
) -> Result<Vec<(String, EqualityCheck)>> {
    let mut merged: Vec<(String, EqualityCheck)> = Vec::with_capacity(registrations.len());
    for (key, check) in registrations {
        match merged.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) if existing.1.label() != check.label() => {
                return Err(duplicate_check_error(op, &key));
            }
            Some(existing) => existing.1 = check,
            None => merged.push((key, check)),
        }
    }
    Ok(merged)
}
