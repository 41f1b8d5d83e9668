//! Field lookup on records.

use crate::config::FieldLookup;
use crate::errors::{EngineError, EngineErrorKind, Result};
use crate::model::{Field, Record, Value};

/// Lookup key used by [`FieldLookup::CaseStyleInsensitive`]:
/// `_` and `-` removed, lowercased
pub fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Property-style names a field may be declared under
fn property_aliases(name: &str) -> Vec<String> {
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return Vec::new(),
    };
    vec![
        format!("get{capitalized}"),
        format!("get_{name}"),
        format!("is{capitalized}"),
        format!("is_{name}"),
    ]
}

/// Plain name behind a property-style name (`getName`, `is_active`)
fn property_base_name(name: &str) -> Option<String> {
    for prefix in ["get_", "is_"] {
        if let Some(rest) = name.strip_prefix(prefix).filter(|rest| !rest.is_empty()) {
            return Some(rest.to_string());
        }
    }
    for prefix in ["get", "is"] {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };
        let mut chars = rest.chars();
        if let Some(first) = chars.next().filter(char::is_ascii_uppercase) {
            return Some(first.to_ascii_lowercase().to_string() + chars.as_str());
        }
    }
    None
}

/// Resolves and reads fields by name
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAccessor {
    lookup: FieldLookup,
}

impl FieldAccessor {
    pub fn new(lookup: FieldLookup) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> FieldLookup {
        self.lookup
    }

    /// Find the field of `record` that answers to `name`.
    ///
    /// # Errors
    ///
    /// `AmbiguousFieldName` when several declared fields normalize to the
    /// same lookup name.
    pub fn find(&self, record: &Record, name: &str) -> Result<Option<Field>> {
        match self.lookup {
            FieldLookup::Exact => {
                if let Some(field) = record.field(name) {
                    return Ok(Some(field));
                }
                Ok(property_aliases(name)
                    .into_iter()
                    .chain(property_base_name(name))
                    .find_map(|alias| record.field(&alias)))
            }
            FieldLookup::CaseStyleInsensitive => {
                let wanted = normalize_field_name(name);
                let candidates: Vec<String> = record
                    .field_names()
                    .iter()
                    .filter(|declared| normalize_field_name(declared) == wanted)
                    .map(|declared| declared.to_string())
                    .collect();
                if candidates.len() > 1 {
                    return Err(EngineError::new(EngineErrorKind::AmbiguousFieldName)
                        .with_op("find_field")
                        .with_type_name(record.type_name())
                        .with_message(format!(
                            "several fields of {} match '{}'",
                            record.type_name(),
                            name
                        ))
                        .with_candidates(candidates));
                }
                Ok(candidates.first().and_then(|declared| record.field(declared)))
            }
        }
    }

    /// Read the value of the field answering to `name`, if any.
    ///
    /// # Errors
    ///
    /// `AmbiguousFieldName` from [`FieldAccessor::find`], or
    /// `FieldAccessDenied` when a computed field fails.
    pub fn get(&self, record: &Record, name: &str) -> Result<Option<Value>> {
        match self.find(record, name)? {
            Some(field) => read_field(record, &field).map(Some),
            None => Ok(None),
        }
    }
}

/// Read a resolved field, tagging failures with the record type
///
/// # Errors
///
/// `FieldAccessDenied` when a computed field fails.
pub fn read_field(record: &Record, field: &Field) -> Result<Value> {
    field
        .read()
        .map_err(|e| EngineError::from(e).with_type_name(record.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AccessError;

    #[test]
    fn test_normalize_field_name() {
        assert_eq!(normalize_field_name("first_name"), "firstname");
        assert_eq!(normalize_field_name("firstName"), "firstname");
        assert_eq!(normalize_field_name("FIRST-NAME"), "firstname");
    }

    #[test]
    fn test_exact_lookup_reads_private_fields() {
        let record = Record::builder("Person")
            .private_field("age", 800)
            .build();
        let accessor = FieldAccessor::default();
        assert_eq!(accessor.get(&record, "age").unwrap(), Some(Value::Int(800)));
        assert_eq!(accessor.get(&record, "name").unwrap(), None);
    }

    #[test]
    fn test_exact_lookup_falls_back_to_property_aliases() {
        let record = Record::builder("Person")
            .computed("getName", || Ok(Value::str("Yoda")))
            .field("is_active", true)
            .build();
        let accessor = FieldAccessor::new(FieldLookup::Exact);
        assert_eq!(
            accessor.get(&record, "name").unwrap(),
            Some(Value::str("Yoda"))
        );
        assert_eq!(
            accessor.get(&record, "active").unwrap(),
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn test_property_lookup_works_both_ways() {
        let record = Record::builder("Person")
            .field("name", "Yoda")
            .field("active", true)
            .build();
        let accessor = FieldAccessor::new(FieldLookup::Exact);
        assert_eq!(
            accessor.get(&record, "getName").unwrap(),
            Some(Value::str("Yoda"))
        );
        assert_eq!(
            accessor.get(&record, "is_active").unwrap(),
            Some(Value::Bool(true))
        );
        assert_eq!(property_base_name("isbn"), None);
        assert_eq!(property_base_name("get"), None);
    }

    #[test]
    fn test_case_style_lookup() {
        let record = Record::builder("Person").field("first_name", "Luke").build();
        let accessor = FieldAccessor::new(FieldLookup::CaseStyleInsensitive);
        assert_eq!(
            accessor.get(&record, "firstName").unwrap(),
            Some(Value::str("Luke"))
        );
        assert!(FieldAccessor::default()
            .get(&record, "firstName")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_case_style_ambiguity_lists_candidates() {
        let record = Record::builder("Person")
            .field("first_name", "Luke")
            .field("firstName", "Leia")
            .build();
        let accessor = FieldAccessor::new(FieldLookup::CaseStyleInsensitive);
        let err = accessor.find(&record, "FirstName").unwrap_err();
        assert_eq!(err.kind(), EngineErrorKind::AmbiguousFieldName);
        assert_eq!(
            err.candidates(),
            Some(&["first_name".to_string(), "firstName".to_string()][..])
        );
    }

    #[test]
    fn test_failing_property_is_access_denied() {
        let record = Record::builder("Vault")
            .computed("secret", || {
                Err(AccessError::Failed {
                    field: "secret".into(),
                    reason: "boom".into(),
                })
            })
            .build();
        let err = FieldAccessor::default().get(&record, "secret").unwrap_err();
        assert_eq!(err.kind(), EngineErrorKind::FieldAccessDenied);
        assert_eq!(err.type_name(), Some("Vault"));
    }
}
