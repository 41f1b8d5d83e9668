//! Field paths naming a node's position relative to the comparison root.
//!
//! A path is immutable: descending derives a new path. Two textual forms
//! exist. The display form keeps indices and keys (`items[2].name`,
//! `map.key("a")`) and is what reports show. The config form drops indices
//! and renders keys bare (`items.name`, `map.a`) and is what ignore, only and
//! comparator registrations are matched against.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::Value;
use crate::representation::{Representation, StandardRepresentation};

/// One navigation step
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named record field
    Field(String),
    /// Position in an ordered sequence
    Index(usize),
    /// Map entry, with the key's rendered and bare text
    Key { rendered: String, bare: String },
}

impl PathSegment {
    /// Key segment for a map key value
    pub fn key(key: &Value) -> Self {
        let rendered = StandardRepresentation::new().to_string_of(key);
        let bare = match key.as_str() {
            Some(s) => s.to_string(),
            None => rendered.clone(),
        };
        PathSegment::Key { rendered, bare }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The comparison root (empty path)
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    pub fn child_field(&self, name: &str) -> Self {
        self.child(PathSegment::Field(name.to_string()))
    }

    pub fn child_index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    pub fn child_key(&self, key: &Value) -> Self {
        self.child(PathSegment::key(key))
    }

    /// Name of the last field or key segment, if any
    pub fn last_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Key { bare, .. } => Some(bare.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Dotted form without indices, used to match configuration entries
    pub fn config_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            let name = match segment {
                PathSegment::Field(name) => name,
                PathSegment::Key { bare, .. } => bare,
                PathSegment::Index(_) => continue,
            };
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(name);
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key { rendered, .. } => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "key({rendered})")?;
                }
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
