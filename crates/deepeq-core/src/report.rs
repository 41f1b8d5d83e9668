//! Difference report model.
//!
//! A [`DifferenceReport`] lists every divergence found by one `compare`
//! call, in discovery order (depth-first, field declaration order, then
//! element order). Each [`Difference`] is immutable once created.

use serde::{Deserialize, Serialize};

use crate::model::Value;
use crate::path::FieldPath;
use crate::representation::Representation;

/// Why a node diverged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifferenceKind {
    /// Values differ
    ValueMismatch,
    /// Runtime types or container kinds differ
    TypeMismatch,
    /// Field or key exists in expected only
    MissingFieldInActual,
    /// Field or key exists in actual only
    MissingFieldInExpected,
    /// Sequences or sets have different sizes
    SizeMismatch,
    /// Exactly one side is null
    UnexpectedNull,
}

impl DifferenceKind {
    /// Stable code
    pub fn code(&self) -> &'static str {
        match self {
            DifferenceKind::ValueMismatch => "VALUE_MISMATCH",
            DifferenceKind::TypeMismatch => "TYPE_MISMATCH",
            DifferenceKind::MissingFieldInActual => "MISSING_FIELD_IN_ACTUAL",
            DifferenceKind::MissingFieldInExpected => "MISSING_FIELD_IN_EXPECTED",
            DifferenceKind::SizeMismatch => "SIZE_MISMATCH",
            DifferenceKind::UnexpectedNull => "UNEXPECTED_NULL",
        }
    }
}

/// One divergence between actual and expected
#[derive(Debug, Clone)]
pub struct Difference {
    path: FieldPath,
    actual: Option<Value>,
    expected: Option<Value>,
    kind: DifferenceKind,
    description: Option<String>,
}

impl Difference {
    pub fn new(
        kind: DifferenceKind,
        path: FieldPath,
        actual: Option<Value>,
        expected: Option<Value>,
    ) -> Self {
        Self {
            path,
            actual,
            expected,
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn actual(&self) -> Option<&Value> {
        self.actual.as_ref()
    }

    pub fn expected(&self) -> Option<&Value> {
        self.expected.as_ref()
    }

    pub fn kind(&self) -> DifferenceKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Human-readable description of this difference
    pub fn describe(&self, repr: &dyn Representation) -> String {
        let location = if self.path.is_root() {
            "Top level actual and expected objects".to_string()
        } else {
            format!("field/property '{}'", self.path)
        };
        let headline = match self.kind {
            DifferenceKind::MissingFieldInActual => format!("{location} is missing in actual"),
            DifferenceKind::MissingFieldInExpected => {
                format!("{location} is missing in expected")
            }
            DifferenceKind::SizeMismatch => format!("{location} differ in size"),
            DifferenceKind::TypeMismatch => format!("{location} differ in type"),
            DifferenceKind::UnexpectedNull => format!("{location} differ (one side is null)"),
            DifferenceKind::ValueMismatch => format!("{location} differ"),
        };
        let mut out = format!(
            "{headline}:\n- actual value  : {}\n- expected value: {}",
            repr.to_string_of_opt(self.actual.as_ref()),
            repr.to_string_of_opt(self.expected.as_ref()),
        );
        if let Some(description) = &self.description {
            out.push_str(&format!("\n{description}"));
        }
        out
    }

    /// Serializable row for this difference
    pub fn summary(&self, repr: &dyn Representation) -> DifferenceSummary {
        DifferenceSummary {
            path: self.path.to_string(),
            kind: self.kind,
            actual: self.actual.as_ref().map(|v| repr.to_string_of(v)),
            expected: self.expected.as_ref().map(|v| repr.to_string_of(v)),
            description: self.description.clone(),
        }
    }
}

/// Rendered, serializable form of a [`Difference`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceSummary {
    pub path: String,
    pub kind: DifferenceKind,
    pub actual: Option<String>,
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Ordered differences produced by one comparison
#[derive(Debug, Clone, Default)]
pub struct DifferenceReport {
    differences: Vec<Difference>,
}

impl DifferenceReport {
    pub fn new(differences: Vec<Difference>) -> Self {
        Self { differences }
    }

    /// Returns `true` if the compared graphs are deeply equal
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Difference> {
        self.differences.iter()
    }

    pub fn into_differences(self) -> Vec<Difference> {
        self.differences
    }

    /// Differences of the given kind, in discovery order
    pub fn of_kind(&self, kind: DifferenceKind) -> Vec<&Difference> {
        self.differences.iter().filter(|d| d.kind == kind).collect()
    }

    /// First difference whose display path equals `path`
    pub fn at_path(&self, path: &str) -> Option<&Difference> {
        self.differences
            .iter()
            .find(|d| d.path.to_string() == path)
    }

    /// Display paths of all differences, in discovery order
    pub fn paths(&self) -> Vec<String> {
        self.differences.iter().map(|d| d.path.to_string()).collect()
    }

    /// Multi-line description of every difference
    pub fn render(&self, repr: &dyn Representation) -> String {
        if self.differences.is_empty() {
            return "No differences found.".to_string();
        }
        let mut out = format!(
            "The following {} difference(s) were found:\n",
            self.differences.len()
        );
        for difference in &self.differences {
            out.push('\n');
            out.push_str(&difference.describe(repr));
            out.push('\n');
        }
        out
    }

    pub fn summaries(&self, repr: &dyn Representation) -> Vec<DifferenceSummary> {
        self.differences.iter().map(|d| d.summary(repr)).collect()
    }

    /// Summaries as a JSON array
    pub fn to_json(&self, repr: &dyn Representation) -> serde_json::Value {
        serde_json::to_value(self.summaries(repr)).unwrap_or(serde_json::Value::Null)
    }
}

impl<'a> IntoIterator for &'a DifferenceReport {
    type Item = &'a Difference;
    type IntoIter = std::slice::Iter<'a, Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::StandardRepresentation;
    use serde_json::json;

    fn city_difference() -> Difference {
        Difference::new(
            DifferenceKind::ValueMismatch,
            FieldPath::root().child_field("address").child_field("city"),
            Some(Value::str("Coruscant")),
            Some(Value::str("Naboo")),
        )
    }

    #[test]
    fn test_describe_value_mismatch() {
        let text = city_difference().describe(&StandardRepresentation::new());
        assert_eq!(
            text,
            "field/property 'address.city' differ:\n- actual value  : \"Coruscant\"\n- expected value: \"Naboo\""
        );
    }

    #[test]
    fn test_describe_root_and_absent() {
        let diff = Difference::new(
            DifferenceKind::MissingFieldInActual,
            FieldPath::root().child_key(&Value::str("b")),
            None,
            Some(Value::Int(2)),
        );
        let text = diff.describe(&StandardRepresentation::new());
        assert!(text.starts_with("field/property 'key(\"b\")' is missing in actual"));
        assert!(text.contains("- actual value  : <absent>"));

        let root = Difference::new(
            DifferenceKind::SizeMismatch,
            FieldPath::root(),
            Some(Value::seq([1, 2, 3])),
            Some(Value::seq([1, 2])),
        )
        .with_description("actual size: 3, expected size: 2");
        let text = root.describe(&StandardRepresentation::new());
        assert!(text.starts_with("Top level actual and expected objects differ in size"));
        assert!(text.ends_with("actual size: 3, expected size: 2"));
    }

    #[test]
    fn test_report_queries() {
        let report = DifferenceReport::new(vec![
            city_difference(),
            Difference::new(
                DifferenceKind::UnexpectedNull,
                FieldPath::root().child_field("name"),
                Some(Value::Null),
                Some(Value::str("Yoda")),
            ),
        ]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.paths(), vec!["address.city", "name"]);
        assert_eq!(report.of_kind(DifferenceKind::UnexpectedNull).len(), 1);
        assert!(report.at_path("address.city").is_some());
        assert!(report.at_path("address").is_none());
    }

    #[test]
    fn test_render_empty_report() {
        let report = DifferenceReport::default();
        assert!(report.is_empty());
        assert_eq!(
            report.render(&StandardRepresentation::new()),
            "No differences found."
        );
    }

    #[test]
    fn test_summaries_serialize_with_stable_codes() {
        let report = DifferenceReport::new(vec![city_difference()]);
        let json = report.to_json(&StandardRepresentation::new());
        assert_eq!(
            json,
            json!([{
                "path": "address.city",
                "kind": "VALUE_MISMATCH",
                "actual": "\"Coruscant\"",
                "expected": "\"Naboo\""
            }])
        );
        assert_eq!(DifferenceKind::SizeMismatch.code(), "SIZE_MISMATCH");
    }
}
