//! Sequence, set and map comparison.

use std::rc::Rc;

use super::Walker;
use crate::errors::Result;
use crate::model::{ContainerKind, Entries, Value};
use crate::path::FieldPath;
use crate::report::{Difference, DifferenceKind};

impl Walker<'_> {
    fn record_size_mismatch(
        &mut self,
        path: &FieldPath,
        actual: &Value,
        expected: &Value,
        actual_len: usize,
        expected_len: usize,
    ) {
        self.differences.push(
            Difference::new(
                DifferenceKind::SizeMismatch,
                path.clone(),
                Some(actual.clone()),
                Some(expected.clone()),
            )
            .with_description(format!(
                "actual size: {actual_len}, expected size: {expected_len}"
            )),
        );
    }

    /// Element by element up to the shorter length; extra elements only
    /// show up in the size mismatch.
    pub(super) fn compare_ordered(
        &mut self,
        path: &FieldPath,
        actual: &Value,
        expected: &Value,
        actual_items: &[Value],
        expected_items: &[Value],
    ) -> Result<()> {
        if actual_items.len() != expected_items.len() {
            self.record_size_mismatch(
                path,
                actual,
                expected,
                actual_items.len(),
                expected_items.len(),
            );
        }
        for (index, (a, e)) in actual_items.iter().zip(expected_items).enumerate() {
            self.walk(&path.child_index(index), a, e)?;
        }
        Ok(())
    }

    /// Greedy first-match pairing. Each actual element takes the first
    /// still-unmatched expected element it is deeply equal to.
    pub(super) fn compare_unordered(
        &mut self,
        path: &FieldPath,
        actual: &Value,
        expected: &Value,
        actual_items: &[Value],
        expected_items: &[Value],
    ) -> Result<()> {
        if actual_items.len() != expected_items.len() {
            self.record_size_mismatch(
                path,
                actual,
                expected,
                actual_items.len(),
                expected_items.len(),
            );
        }

        let mut taken = vec![false; expected_items.len()];
        let mut unmatched_actual = Vec::new();
        for a in actual_items {
            let mut found = None;
            for (j, e) in expected_items.iter().enumerate() {
                if !taken[j] && self.scratch_equal(path, a, e)? {
                    found = Some(j);
                    break;
                }
            }
            match found {
                Some(j) => taken[j] = true,
                None => unmatched_actual.push(a),
            }
        }

        for a in unmatched_actual {
            self.record(DifferenceKind::ValueMismatch, path, Some(a), None);
        }
        for (e, _) in expected_items
            .iter()
            .zip(&taken)
            .filter(|(_, taken)| !**taken)
        {
            self.record(DifferenceKind::ValueMismatch, path, None, Some(e));
        }
        Ok(())
    }

    /// Missing keys first (actual side, then expected side), then common
    /// keys in expected's entry order.
    pub(super) fn compare_maps(
        &mut self,
        path: &FieldPath,
        actual: &Rc<Entries>,
        expected: &Rc<Entries>,
    ) -> Result<()> {
        let actual_entries = actual.entries();
        let expected_entries = expected.entries();
        let pairing = self.pair_keys(path, &actual_entries, &expected_entries)?;
        let mut actual_paired = vec![false; actual_entries.len()];
        for j in pairing.iter().flatten() {
            actual_paired[*j] = true;
        }

        for ((key, expected_value), paired) in expected_entries.iter().zip(&pairing) {
            if paired.is_some() {
                continue;
            }
            let child = path.child_key(key);
            if self.is_entry_skipped(&child, None, Some(expected_value)) {
                continue;
            }
            self.record(
                DifferenceKind::MissingFieldInActual,
                &child,
                None,
                Some(expected_value),
            );
        }
        for ((key, actual_value), paired) in actual_entries.iter().zip(&actual_paired) {
            if *paired {
                continue;
            }
            let child = path.child_key(key);
            if self.is_entry_skipped(&child, Some(actual_value), None) {
                continue;
            }
            self.record(
                DifferenceKind::MissingFieldInExpected,
                &child,
                Some(actual_value),
                None,
            );
        }

        for ((key, expected_value), paired) in expected_entries.iter().zip(&pairing) {
            let Some(j) = *paired else {
                continue;
            };
            let actual_value = &actual_entries[j].1;
            let child = path.child_key(key);
            if self.config.is_path_ignored(&child.config_path())
                || self
                    .config
                    .is_value_ignored(Some(actual_value), Some(expected_value))
            {
                continue;
            }
            self.walk(&child, actual_value, expected_value)?;
        }
        Ok(())
    }

    /// For each expected key, the index of the actual key it pairs with.
    ///
    /// Keys equal by natural equality pair first. Remaining reference-valued
    /// keys then take the first unpaired actual key they are deeply equal to.
    fn pair_keys(
        &mut self,
        path: &FieldPath,
        actual_entries: &[(Value, Value)],
        expected_entries: &[(Value, Value)],
    ) -> Result<Vec<Option<usize>>> {
        let mut taken = vec![false; actual_entries.len()];
        let mut pairing = Vec::with_capacity(expected_entries.len());
        for (key, _) in expected_entries {
            let found = actual_entries
                .iter()
                .enumerate()
                .position(|(j, (k, _))| !taken[j] && k.natural_eq(key));
            if let Some(j) = found {
                taken[j] = true;
            }
            pairing.push(found);
        }

        for (i, (key, _)) in expected_entries.iter().enumerate() {
            if pairing[i].is_some() || key.kind() == ContainerKind::Leaf {
                continue;
            }
            let key_path = path.child_key(key);
            for (j, (candidate, _)) in actual_entries.iter().enumerate() {
                if taken[j] || candidate.kind() == ContainerKind::Leaf {
                    continue;
                }
                if self.scratch_equal(&key_path, candidate, key)? {
                    taken[j] = true;
                    pairing[i] = Some(j);
                    break;
                }
            }
        }
        Ok(pairing)
    }

    /// Filtering for an entry present on one side only
    fn is_entry_skipped(
        &self,
        child: &FieldPath,
        actual: Option<&Value>,
        expected: Option<&Value>,
    ) -> bool {
        if self.config.is_path_ignored(&child.config_path())
            || self.config.is_value_ignored(actual, expected)
        {
            return true;
        }
        let present = actual.or(expected);
        self.config.treat_null_and_absent_as_equal() && present.is_some_and(Value::is_null)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ComparisonConfig;
    use crate::model::{Record, Value};
    use crate::report::DifferenceKind;
    use crate::walker::compare;

    #[test]
    fn test_ordered_size_mismatch_then_pairwise() {
        let report = compare(
            &Value::seq([1, 9, 3]),
            &Value::seq([1, 2]),
            &ComparisonConfig::default(),
        )
        .unwrap();
        let kinds: Vec<DifferenceKind> = report.iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![DifferenceKind::SizeMismatch, DifferenceKind::ValueMismatch]
        );
        assert_eq!(report.paths(), vec!["", "[1]"]);
    }

    #[test]
    fn test_sets_ignore_order() {
        let report = compare(
            &Value::set(["a", "b"]),
            &Value::set(["b", "a"]),
            &ComparisonConfig::default(),
        )
        .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_unordered_unmatched_elements() {
        let config = ComparisonConfig::builder()
            .ordering_sensitive_collections(false)
            .build()
            .unwrap();
        let report = compare(&Value::seq([1, 2, 3]), &Value::seq([3, 4, 1]), &config).unwrap();
        assert_eq!(report.len(), 2);
        let first = &report.differences()[0];
        assert_eq!(first.actual(), Some(&Value::Int(2)));
        assert!(first.expected().is_none());
        let second = &report.differences()[1];
        assert!(second.actual().is_none());
        assert_eq!(second.expected(), Some(&Value::Int(4)));
    }

    #[test]
    fn test_unordered_duplicates_are_counted() {
        let config = ComparisonConfig::builder()
            .ordering_sensitive_collections(false)
            .build()
            .unwrap();
        let report = compare(&Value::seq([1, 1, 2]), &Value::seq([1, 2, 2]), &config).unwrap();
        assert_eq!(report.len(), 2);
        assert!(report
            .iter()
            .all(|d| d.kind() == DifferenceKind::ValueMismatch));
    }

    #[test]
    fn test_map_missing_keys_on_both_sides() {
        let report = compare(
            &Value::map([("a", 1), ("c", 3)]),
            &Value::map([("a", 1), ("b", 2)]),
            &ComparisonConfig::default(),
        )
        .unwrap();
        assert_eq!(report.paths(), vec!["key(\"b\")", "key(\"c\")"]);
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
    fn test_map_values_compared_recursively() {
        let report = compare(
            &Value::map([("a", Value::seq([1, 2]))]),
            &Value::map([("a", Value::seq([1, 3]))]),
            &ComparisonConfig::default(),
        )
        .unwrap();
        assert_eq!(report.paths(), vec!["key(\"a\")[1]"]);
    }

    #[test]
    fn test_map_keys_pair_by_structure() {
        let key = |id: &str| Record::builder("Key").field("id", id).build_value();
        let report = compare(
            &Value::map([(Value::seq([1, 2]), 1), (key("x"), 2)]),
            &Value::map([(Value::seq([1, 2]), 1), (key("x"), 3)]),
            &ComparisonConfig::default(),
        )
        .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.differences()[0].kind(), DifferenceKind::ValueMismatch);
        assert_eq!(report.differences()[0].actual(), Some(&Value::Int(2)));
    }

    #[test]
    fn test_map_structural_keys_pair_once() {
        let report = compare(
            &Value::map([(Value::seq([1]), "a"), (Value::seq([2]), "b")]),
            &Value::map([(Value::seq([2]), "b"), (Value::seq([3]), "c")]),
            &ComparisonConfig::default(),
        )
        .unwrap();
        let kinds: Vec<DifferenceKind> = report.iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                DifferenceKind::MissingFieldInActual,
                DifferenceKind::MissingFieldInExpected
            ]
        );
        assert_eq!(report.differences()[0].expected(), Some(&Value::str("c")));
        assert_eq!(report.differences()[1].actual(), Some(&Value::str("a")));
    }
}
