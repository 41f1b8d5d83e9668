//! Resolution of the equality strategy for a node.
//!
//! Precedence, highest first:
//! 1. a check registered for the node's field path
//! 2. a check registered for the runtime type (type pairs before single types)
//! 3. a check registered for any supertype; the first registered wins
//! 4. the default recursive comparison
//!
//! Within one level, checks are tried in registration order.

use crate::config::{ComparisonConfig, EqualityCheck};
use crate::model::Value;

/// Strategy chosen for one pair of values
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'c> {
    Field {
        path: &'c str,
        check: &'c EqualityCheck,
    },
    Type {
        type_name: &'c str,
        check: &'c EqualityCheck,
    },
    Default,
}

impl<'c> Strategy<'c> {
    /// The user check, unless this is the default strategy
    pub fn check(&self) -> Option<&'c EqualityCheck> {
        match self {
            Strategy::Field { check, .. } | Strategy::Type { check, .. } => Some(check),
            Strategy::Default => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Field { .. } => "field",
            Strategy::Type { .. } => "type",
            Strategy::Default => "default",
        }
    }
}

/// Read-only view over the checks registered in a configuration
#[derive(Debug, Clone, Copy)]
pub struct StrategyRegistry<'c> {
    config: &'c ComparisonConfig,
}

impl<'c> StrategyRegistry<'c> {
    pub fn new(config: &'c ComparisonConfig) -> Self {
        Self { config }
    }

    /// Pick the strategy for `actual` and `expected` found at `config_path`
    pub fn resolve(&self, config_path: &str, actual: &Value, expected: &Value) -> Strategy<'c> {
        if !config_path.is_empty() {
            if let Some((path, check)) = self.config.field_check_entry(config_path) {
                return Strategy::Field { path, check };
            }
        }
        if !self.config.has_type_checks() {
            return Strategy::Default;
        }

        let actual_chain = actual.type_chain();
        let Some((runtime_type, supertypes)) = actual_chain.split_first() else {
            return Strategy::Default;
        };
        let expected_type = expected.type_name();

        self.first_match(|t| t == *runtime_type, expected_type)
            .or_else(|| self.first_match(|t| supertypes.contains(&t), expected_type))
            .unwrap_or(Strategy::Default)
    }

    /// First registered check whose type satisfies `accepts`, type pairs first
    fn first_match(
        &self,
        accepts: impl Fn(&str) -> bool,
        expected_type: &str,
    ) -> Option<Strategy<'c>> {
        let config: &'c ComparisonConfig = self.config;
        let pair = config
            .type_pair_checks()
            .iter()
            .find(|((a, e), _)| accepts(a.as_str()) && e == expected_type);
        if let Some(((a, _), check)) = pair {
            return Some(Strategy::Type {
                type_name: a.as_str(),
                check,
            });
        }
        config
            .type_checks()
            .iter()
            .find(|(t, _)| accepts(t.as_str()))
            .map(|(t, check)| Strategy::Type {
                type_name: t.as_str(),
                check,
            })
    }
}
