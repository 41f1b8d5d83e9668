//! Identity-keyed guard against re-entering a pair already being compared.

use std::collections::HashSet;

use crate::model::Value;

/// Ordered `(actual, expected)` identity pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitedPair {
    pub actual: usize,
    pub expected: usize,
}

impl VisitedPair {
    /// Pair for two reference values; `None` when either side is a leaf
    pub fn of(actual: &Value, expected: &Value) -> Option<Self> {
        Some(Self {
            actual: actual.identity()?,
            expected: expected.identity()?,
        })
    }
}

/// Pairs active on the current recursion stack
///
/// A pair that was left may be entered again, so shared substructures in
/// sibling branches are still compared.
#[derive(Debug, Default)]
pub struct CycleGuard {
    active: HashSet<VisitedPair>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the pair active. Returns `false` if it already was.
    pub fn enter(&mut self, pair: VisitedPair) -> bool {
        self.active.insert(pair)
    }

    pub fn leave(&mut self, pair: VisitedPair) {
        self.active.remove(&pair);
    }

    pub fn is_active(&self, pair: &VisitedPair) -> bool {
        self.active.contains(pair)
    }

    pub fn depth(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_have_no_pair() {
        assert!(VisitedPair::of(&Value::Int(1), &Value::seq([1])).is_none());
        assert!(VisitedPair::of(&Value::seq([1]), &Value::seq([1])).is_some());
    }

    #[test]
    fn test_enter_twice_is_rejected_until_left() {
        let a = Value::seq([1]);
        let b = Value::seq([1]);
        let pair = VisitedPair::of(&a, &b).unwrap();
        let mut guard = CycleGuard::new();
        assert!(guard.enter(pair));
        assert!(!guard.enter(pair));
        guard.leave(pair);
        assert!(!guard.is_active(&pair));
        assert!(guard.enter(pair));
    }

    #[test]
    fn test_pairs_are_ordered() {
        let a = Value::seq([1]);
        let b = Value::seq([1]);
        let mut guard = CycleGuard::new();
        assert!(guard.enter(VisitedPair::of(&a, &b).unwrap()));
        assert!(guard.enter(VisitedPair::of(&b, &a).unwrap()));
        assert_eq!(guard.depth(), 2);
    }
}
