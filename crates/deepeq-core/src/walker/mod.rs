//! Recursive difference walker.
//!
//! The entry point is [`compare`], which walks two value graphs in lockstep
//! and returns a [`DifferenceReport`]. Per node pair:
//!
//! 1. identical reference values are equal
//! 2. both null is equal; exactly one null is one difference
//! 3. a pair already being compared higher up the stack is equal
//! 4. a registered comparator or predicate decides alone
//! 5. containers, records and leaves are compared structurally
//!
//! Data-shape mismatches are never errors. Only ambiguous field lookups and
//! failing computed fields abort a comparison.

mod containers;
pub mod cycle_guard;

use std::collections::HashSet;
use std::rc::Rc;

use crate::accessor::{read_field, FieldAccessor};
use crate::config::ComparisonConfig;
use crate::errors::Result;
use crate::model::{Comparable, ContainerKind, Record, Value};
use crate::path::FieldPath;
use crate::registry::{Strategy, StrategyRegistry};
use crate::report::{Difference, DifferenceKind, DifferenceReport};
use crate::schema;
use crate::{log_op_end, log_op_error, log_op_start};

pub use cycle_guard::{CycleGuard, VisitedPair};

/// Compare `actual` against `expected` under `config`.
///
/// An empty report means the graphs are deeply equal.
///
/// # Errors
///
/// - `AmbiguousFieldName` — a case-style-insensitive lookup matched several fields
/// - `FieldAccessDenied` — a computed field failed when read
///
/// Errors carry the display path of the field being compared.
pub fn compare(
    actual: &Value,
    expected: &Value,
    config: &ComparisonConfig,
) -> Result<DifferenceReport> {
    log_op_start!(
        "compare",
        actual_type = actual.type_name(),
        expected_type = expected.type_name()
    );
    let start = std::time::Instant::now();

    let mut walker = Walker::new(config);
    let report = walker
        .walk(&FieldPath::root(), actual, expected)
        .map(|()| DifferenceReport::new(walker.differences))
        .map_err(|e| {
            log_op_error!(
                "compare",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        difference_count = report.len() as u64
    );
    Ok(report)
}

/// [`compare`] for anything that describes itself as a [`Value`]
///
/// # Errors
///
/// Same as [`compare`].
pub fn compare_values<A, E>(
    actual: &A,
    expected: &E,
    config: &ComparisonConfig,
) -> Result<DifferenceReport>
where
    A: Comparable + ?Sized,
    E: Comparable + ?Sized,
{
    compare(&actual.to_value(), &expected.to_value(), config)
}

/// True when the comparison finds no difference
///
/// # Errors
///
/// Same as [`compare`].
pub fn are_equal(actual: &Value, expected: &Value, config: &ComparisonConfig) -> Result<bool> {
    compare(actual, expected, config).map(|report| report.is_empty())
}

/// State of one comparison call
struct Walker<'c> {
    config: &'c ComparisonConfig,
    registry: StrategyRegistry<'c>,
    accessor: FieldAccessor,
    guard: CycleGuard,
    differences: Vec<Difference>,
}

impl<'c> Walker<'c> {
    fn new(config: &'c ComparisonConfig) -> Self {
        Self {
            config,
            registry: StrategyRegistry::new(config),
            accessor: FieldAccessor::new(config.field_lookup()),
            guard: CycleGuard::new(),
            differences: Vec::new(),
        }
    }

    fn record(
        &mut self,
        kind: DifferenceKind,
        path: &FieldPath,
        actual: Option<&Value>,
        expected: Option<&Value>,
    ) {
        self.differences.push(Difference::new(
            kind,
            path.clone(),
            actual.cloned(),
            expected.cloned(),
        ));
    }

    fn walk(&mut self, path: &FieldPath, actual: &Value, expected: &Value) -> Result<()> {
        if actual.same_identity(expected) {
            return Ok(());
        }
        match (actual.is_null(), expected.is_null()) {
            (true, true) => return Ok(()),
            (true, false) | (false, true) => {
                let kind = self.config.null_mismatch_kind();
                self.record(kind, path, Some(actual), Some(expected));
                return Ok(());
            }
            (false, false) => {}
        }

        let Some(pair) = VisitedPair::of(actual, expected) else {
            return self.walk_node(path, actual, expected);
        };
        if !self.guard.enter(pair) {
            tracing::trace!(
                op = "compare",
                event = schema::EVENT_CYCLE_HIT,
                path = %path,
                actual_type = actual.type_name(),
            );
            return Ok(());
        }
        let result = self.walk_node(path, actual, expected);
        self.guard.leave(pair);
        result
    }

    fn walk_node(&mut self, path: &FieldPath, actual: &Value, expected: &Value) -> Result<()> {
        let config_path = path.config_path();
        let strategy = self.registry.resolve(&config_path, actual, expected);
        if let Some(check) = strategy.check() {
            let equal = check.are_equal(actual, expected);
            tracing::trace!(
                op = "compare",
                event = schema::EVENT_CUSTOM_STRATEGY,
                path = %path,
                strategy = strategy.label(),
                equal,
            );
            if !equal {
                self.record(DifferenceKind::ValueMismatch, path, Some(actual), Some(expected));
            }
            return Ok(());
        }
        debug_assert!(matches!(strategy, Strategy::Default));

        if actual.kind() != expected.kind()
            || (self.config.strict_type_checking() && actual.type_name() != expected.type_name())
        {
            self.record(DifferenceKind::TypeMismatch, path, Some(actual), Some(expected));
            return Ok(());
        }

        match (actual, expected) {
            (Value::Seq(a), Value::Seq(e)) => {
                if self.config.is_ordered(&config_path) {
                    self.compare_ordered(path, actual, expected, &a.items(), &e.items())
                } else {
                    self.compare_unordered(path, actual, expected, &a.items(), &e.items())
                }
            }
            (Value::Set(a), Value::Set(e)) => {
                self.compare_unordered(path, actual, expected, &a.items(), &e.items())
            }
            (Value::Map(a), Value::Map(e)) => self.compare_maps(path, a, e),
            (Value::Record(a), Value::Record(e)) => self.compare_records(path, a, e),
            _ => {
                debug_assert_eq!(actual.kind(), ContainerKind::Leaf);
                if !actual.natural_eq(expected) {
                    self.record(DifferenceKind::ValueMismatch, path, Some(actual), Some(expected));
                }
                Ok(())
            }
        }
    }

    /// Walk expected's fields in declaration order, then report fields
    /// only actual declares.
    fn compare_records(
        &mut self,
        path: &FieldPath,
        actual: &Rc<Record>,
        expected: &Rc<Record>,
    ) -> Result<()> {
        let mut matched: HashSet<Rc<str>> = HashSet::new();

        for name in expected.field_names() {
            let child = path.child_field(&name);
            let tag = |e: crate::errors::EngineError| e.with_path(child.to_string());
            let ignored = self.config.is_path_ignored(&child.config_path());

            let actual_field = match self.accessor.find(actual, &name) {
                Ok(found) => found,
                // A lookup failure on an ignored field does not matter.
                Err(_) if ignored => None,
                Err(e) => return Err(tag(e)),
            };
            if let Some(field) = &actual_field {
                matched.insert(Rc::from(field.name()));
            }
            if ignored {
                continue;
            }

            // Resolved through the accessor so a case-style collision among
            // expected's own fields is reported like one on actual's side.
            let Some(expected_field) = self.accessor.find(expected, &name).map_err(tag)? else {
                continue;
            };
            let expected_value = read_field(expected, &expected_field).map_err(tag)?;
            match actual_field {
                Some(field) => {
                    let actual_value = read_field(actual, &field).map_err(tag)?;
                    if self
                        .config
                        .is_value_ignored(Some(&actual_value), Some(&expected_value))
                    {
                        continue;
                    }
                    self.walk(&child, &actual_value, &expected_value)?;
                }
                None => {
                    if self.config.is_value_ignored(None, Some(&expected_value))
                        || (expected_value.is_null()
                            && self.config.treat_null_and_absent_as_equal())
                    {
                        continue;
                    }
                    self.record(
                        DifferenceKind::MissingFieldInActual,
                        &child,
                        None,
                        Some(&expected_value),
                    );
                }
            }
        }

        for name in actual.field_names() {
            if matched.contains(&name) {
                continue;
            }
            let child = path.child_field(&name);
            if self.config.is_path_ignored(&child.config_path()) {
                continue;
            }
            let Some(field) = actual.field(&name) else {
                continue;
            };
            let actual_value =
                read_field(actual, &field).map_err(|e| e.with_path(child.to_string()))?;
            if self.config.is_value_ignored(Some(&actual_value), None)
                || (actual_value.is_null() && self.config.treat_null_and_absent_as_equal())
            {
                continue;
            }
            self.record(
                DifferenceKind::MissingFieldInExpected,
                &child,
                Some(&actual_value),
                None,
            );
        }
        Ok(())
    }

    /// Compare without recording anything; the cycle guard is shared so a
    /// scratch walk through a cycle terminates like the main walk.
    fn scratch_equal(
        &mut self,
        path: &FieldPath,
        actual: &Value,
        expected: &Value,
    ) -> Result<bool> {
        let saved = std::mem::take(&mut self.differences);
        let outcome = self.walk(path, actual, expected);
        let found = std::mem::replace(&mut self.differences, saved);
        outcome.map(|()| found.is_empty())
    }
}
