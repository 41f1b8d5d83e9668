//! Textual rendering of values for difference descriptions.
//!
//! The engine never consults a representation to decide equality. It is only
//! used to render values in reports and to name map keys in field paths.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::model::Value;

/// Placeholder for a value that does not exist on one side
pub const ABSENT: &str = "<absent>";

/// Renders values as text
pub trait Representation {
    fn to_string_of(&self, value: &Value) -> String;

    /// Text for an optional value, using [`ABSENT`] when missing
    fn to_string_of_opt(&self, value: Option<&Value>) -> String {
        match value {
            Some(v) => self.to_string_of(v),
            None => ABSENT.to_string(),
        }
    }
}

/// Default representation
///
/// Strings are double-quoted, chars single-quoted, sequences render as
/// `[a, b]`, sets as `{a, b}`, maps as `{k=v}` and records as
/// `Type {field=value}`. A node already being rendered higher up renders
/// as `(this Type)`, so cyclic graphs terminate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRepresentation {
    escape_unicode: bool,
}

impl StandardRepresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant escaping non-ASCII characters of strings and chars as `\uXXXX`
    pub fn unicode() -> Self {
        Self {
            escape_unicode: true,
        }
    }

    fn text(&self, s: &str) -> String {
        if !self.escape_unicode {
            return s.to_string();
        }
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            if c.is_ascii() {
                out.push(c);
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
        out
    }

    fn render(&self, value: &Value, active: &mut HashSet<usize>, out: &mut String) {
        if let Some(id) = value.identity() {
            if !active.insert(id) {
                let _ = write!(out, "(this {})", value.type_name());
                return;
            }
        }
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Value::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Float(x) => {
                let _ = write!(out, "{x:?}");
            }
            Value::Char(c) => {
                let _ = write!(out, "'{}'", self.text(&c.to_string()));
            }
            Value::Str(s) => {
                let _ = write!(out, "\"{}\"", self.text(s));
            }
            Value::Enum { variant, .. } => out.push_str(variant),
            Value::Seq(elements) => {
                self.render_items(&elements.items(), "[", "]", active, out);
            }
            Value::Set(elements) => {
                self.render_items(&elements.items(), "{", "}", active, out);
            }
            Value::Map(entries) => {
                out.push('{');
                for (i, (k, v)) in entries.entries().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render(k, active, out);
                    out.push('=');
                    self.render(v, active, out);
                }
                out.push('}');
            }
            Value::Record(record) => {
                let _ = write!(out, "{} {{", record.type_name());
                for (i, name) in record.field_names().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}=", name);
                    match record.field(name).map(|f| f.read()) {
                        Some(Ok(field_value)) => self.render(&field_value, active, out),
                        _ => out.push_str("<inaccessible>"),
                    }
                }
                out.push('}');
            }
        }
        if let Some(id) = value.identity() {
            active.remove(&id);
        }
    }

    fn render_items(
        &self,
        items: &[Value],
        open: &str,
        close: &str,
        active: &mut HashSet<usize>,
        out: &mut String,
    ) {
        out.push_str(open);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.render(item, active, out);
        }
        out.push_str(close);
    }
}

impl Representation for StandardRepresentation {
    fn to_string_of(&self, value: &Value) -> String {
        let mut out = String::new();
        self.render(value, &mut HashSet::new(), &mut out);
        out
    }
}
