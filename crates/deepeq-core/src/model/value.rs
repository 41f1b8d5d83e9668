//! Dynamic value graph walked by the comparison engine.
//!
//! Leaves are plain values. Sequences, sets, maps and records are
//! reference-counted nodes with interior mutability, so a graph may refer
//! back to itself. Two reference values are *identical* when they point at
//! the same node.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::model::comparable::Comparable;
use crate::model::record::Record;

pub const NULL_TYPE: &str = "null";
pub const BOOL_TYPE: &str = "bool";
pub const INT_TYPE: &str = "i64";
pub const FLOAT_TYPE: &str = "f64";
pub const CHAR_TYPE: &str = "char";
pub const STRING_TYPE: &str = "String";
pub const SEQ_TYPE: &str = "Vec";
pub const SET_TYPE: &str = "Set";
pub const MAP_TYPE: &str = "Map";

/// Supertype shared by the numeric leaves
pub const NUMBER_SUPERTYPE: &str = "number";
/// Supertype shared by sequences and sets
pub const COLLECTION_SUPERTYPE: &str = "Collection";

/// Structural classification of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Atomic value (including null)
    Leaf,
    /// Ordered elements
    Sequence,
    /// Unordered elements
    Set,
    /// Key/value entries
    Map,
    /// Named fields
    Record,
}

/// A node in a comparable object graph
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Rc<str>),
    /// Unit-like enum variant, compared by type and variant name
    Enum {
        type_name: Rc<str>,
        variant: Rc<str>,
    },
    Seq(Rc<Elements>),
    Set(Rc<Elements>),
    Map(Rc<Entries>),
    Record(Rc<Record>),
}

impl Value {
    /// String leaf
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Enum leaf
    pub fn enum_variant(type_name: impl AsRef<str>, variant: impl AsRef<str>) -> Self {
        Value::Enum {
            type_name: Rc::from(type_name.as_ref()),
            variant: Rc::from(variant.as_ref()),
        }
    }

    /// Ordered sequence (`Vec`)
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Comparable,
    {
        Self::seq_named(SEQ_TYPE, items)
    }

    /// Ordered sequence with an explicit runtime type name (e.g. `array`)
    pub fn seq_named<I, T>(type_name: &str, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Comparable,
    {
        Value::Seq(Rc::new(Elements::new(type_name, collect_values(items))))
    }

    /// Unordered set
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Comparable,
    {
        Self::set_named(SET_TYPE, items)
    }

    /// Unordered set with an explicit runtime type name
    pub fn set_named<I, T>(type_name: &str, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Comparable,
    {
        Value::Set(Rc::new(Elements::new(type_name, collect_values(items))))
    }

    /// Map with entries in insertion order
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Comparable,
        V: Comparable,
    {
        Self::map_named(MAP_TYPE, entries)
    }

    /// Map with an explicit runtime type name
    pub fn map_named<I, K, V>(type_name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Comparable,
        V: Comparable,
    {
        let node = Entries::new(type_name);
        for (k, v) in entries {
            node.insert(k.to_value(), v.to_value());
        }
        Value::Map(Rc::new(node))
    }

    /// Structural classification
    pub fn kind(&self) -> ContainerKind {
        match self {
            Value::Seq(_) => ContainerKind::Sequence,
            Value::Set(_) => ContainerKind::Set,
            Value::Map(_) => ContainerKind::Map,
            Value::Record(_) => ContainerKind::Record,
            _ => ContainerKind::Leaf,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type name
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => NULL_TYPE,
            Value::Bool(_) => BOOL_TYPE,
            Value::Int(_) => INT_TYPE,
            Value::Float(_) => FLOAT_TYPE,
            Value::Char(_) => CHAR_TYPE,
            Value::Str(_) => STRING_TYPE,
            Value::Enum { type_name, .. } => &**type_name,
            Value::Seq(e) | Value::Set(e) => e.type_name(),
            Value::Map(m) => m.type_name(),
            Value::Record(r) => r.type_name(),
        }
    }

    /// Runtime type followed by its supertypes, most specific first
    pub fn type_chain(&self) -> Vec<&str> {
        let mut chain = vec![self.type_name()];
        match self {
            Value::Int(_) | Value::Float(_) => chain.push(NUMBER_SUPERTYPE),
            Value::Seq(_) | Value::Set(_) => chain.push(COLLECTION_SUPERTYPE),
            Value::Record(r) => chain.extend(r.supertypes()),
            _ => {}
        }
        chain
    }

    /// Node address for reference values, `None` for leaves
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Seq(e) | Value::Set(e) => Some(Rc::as_ptr(e) as *const () as usize),
            Value::Map(m) => Some(Rc::as_ptr(m) as *const () as usize),
            Value::Record(r) => Some(Rc::as_ptr(r) as *const () as usize),
            _ => None,
        }
    }

    /// True when both values are the same node
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b && self.kind() == other.kind(),
            _ => false,
        }
    }

    /// Natural equality: leaves by value, reference values by identity.
    ///
    /// Floats follow boxed-float semantics: `NaN` equals `NaN`.
    pub fn natural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (
                Value::Enum {
                    type_name: ta,
                    variant: va,
                },
                Value::Enum {
                    type_name: tb,
                    variant: vb,
                },
            ) => ta == tb && va == vb,
            _ => self.same_identity(other),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Rc<Record>> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_elements(&self) -> Option<&Rc<Elements>> {
        match self {
            Value::Seq(e) | Value::Set(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&Rc<Entries>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.natural_eq(other)
    }
}

// Shallow on purpose: reference values may be cyclic.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Enum { type_name, variant } => write!(f, "Enum({type_name}::{variant})"),
            Value::Seq(e) => write!(f, "Seq({}, len={})", e.type_name(), e.len()),
            Value::Set(e) => write!(f, "Set({}, len={})", e.type_name(), e.len()),
            Value::Map(m) => write!(f, "Map({}, len={})", m.type_name(), m.len()),
            Value::Record(r) => write!(f, "Record({})", r.type_name()),
        }
    }
}

fn collect_values<I, T>(items: I) -> Vec<Value>
where
    I: IntoIterator<Item = T>,
    T: Comparable,
{
    items.into_iter().map(|item| item.to_value()).collect()
}

/// Element storage shared by sequences and sets
pub struct Elements {
    type_name: Rc<str>,
    items: RefCell<Vec<Value>>,
}

impl Elements {
    pub fn new(type_name: &str, items: Vec<Value>) -> Self {
        Self {
            type_name: Rc::from(type_name),
            items: RefCell::new(items),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Snapshot of the current elements
    pub fn items(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Append an element (used to close cycles after construction)
    pub fn push(&self, item: impl Comparable) {
        self.items.borrow_mut().push(item.to_value());
    }
}

/// Entry storage for maps, kept in insertion order
pub struct Entries {
    type_name: Rc<str>,
    entries: RefCell<Vec<(Value, Value)>>,
}

impl Entries {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: Rc::from(type_name),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Insert or replace the value stored under `key`
    pub fn insert(&self, key: Value, value: Value) {
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| k.natural_eq(&key)) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.entries
            .borrow()
            .iter()
            .find(|(k, _)| k.natural_eq(key))
            .map(|(_, v)| v.clone())
    }

    /// Snapshot of the current entries
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
