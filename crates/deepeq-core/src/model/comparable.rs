//! Conversion of Rust values into the comparable value graph.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use crate::model::record::Record;
use crate::model::value::Value;
use crate::representation::{Representation, StandardRepresentation};

/// Types that can describe themselves as a [`Value`]
///
/// Implement this for domain structs (typically by building a
/// [`Record`]) to compare them with the engine.
pub trait Comparable {
    fn to_value(&self) -> Value;
}

impl Comparable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Comparable for Rc<Record> {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Comparable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! int_comparable {
    ($($t:ty),*) => {
        $(
            impl Comparable for $t {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_comparable!(i8, i16, i32, i64, u8, u16, u32);

impl Comparable for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Comparable for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Comparable for char {
    fn to_value(&self) -> Value {
        Value::Char(*self)
    }
}

impl Comparable for str {
    fn to_value(&self) -> Value {
        Value::str(self)
    }
}

impl Comparable for String {
    fn to_value(&self) -> Value {
        Value::str(self)
    }
}

impl<T: Comparable + ?Sized> Comparable for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Comparable> Comparable for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Comparable> Comparable for [T] {
    fn to_value(&self) -> Value {
        Value::seq_named("array", self.iter())
    }
}

impl<T: Comparable, const N: usize> Comparable for [T; N] {
    fn to_value(&self) -> Value {
        Value::seq_named("array", self.iter())
    }
}

impl<T: Comparable> Comparable for Vec<T> {
    fn to_value(&self) -> Value {
        Value::seq(self.iter())
    }
}

impl<T: Comparable> Comparable for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::set_named("BTreeSet", self.iter())
    }
}

/// Sort key giving hash containers a stable element order
fn render_key(value: &Value) -> (String, String) {
    (
        StandardRepresentation::new().to_string_of(value),
        value.type_name().to_string(),
    )
}

impl<T: Comparable, S> Comparable for HashSet<T, S> {
    fn to_value(&self) -> Value {
        let mut items: Vec<Value> = self.iter().map(Comparable::to_value).collect();
        items.sort_by_cached_key(render_key);
        Value::set_named("HashSet", items)
    }
}

impl<K: Comparable, V: Comparable> Comparable for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::map_named("BTreeMap", self.iter())
    }
}

impl<K: Comparable, V: Comparable, S> Comparable for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        let mut entries: Vec<(Value, Value)> = self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect();
        entries.sort_by_cached_key(|(k, _)| render_key(k));
        Value::map_named("HashMap", entries)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<Rc<Record>> for Value {
    fn from(record: Rc<Record>) -> Self {
        Value::Record(record)
    }
}
