//! Field-bearing nodes.
//!
//! A [`Record`] plays the role of an object instance: a runtime type name, an
//! optional list of supertypes and an ordered list of fields. Fields keep
//! their declaration order, which is the order the walker visits them in.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::AccessError;
use crate::model::comparable::Comparable;
use crate::model::value::Value;

/// Declared visibility of a field
///
/// The engine reads every field regardless of visibility; the flag only
/// documents how the field was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Computed field body
pub type PropertyFn = Rc<dyn Fn() -> Result<Value, AccessError>>;

/// Storage behind a field
#[derive(Clone)]
pub enum FieldSlot {
    /// Plain stored value
    Stored(Value),
    /// Value produced on each read; reading may fail
    Computed(PropertyFn),
}

/// A declared field
#[derive(Clone)]
pub struct Field {
    name: Rc<str>,
    visibility: Visibility,
    slot: FieldSlot,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.slot, FieldSlot::Computed(_))
    }

    /// Read the field's current value
    pub fn read(&self) -> Result<Value, AccessError> {
        match &self.slot {
            FieldSlot::Stored(value) => Ok(value.clone()),
            FieldSlot::Computed(property) => property(),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = match &self.slot {
            FieldSlot::Stored(value) => format!("{:?}", value),
            FieldSlot::Computed(_) => "<computed>".to_string(),
        };
        f.debug_struct("Field")
            .field("name", &&*self.name)
            .field("visibility", &self.visibility)
            .field("slot", &slot)
            .finish()
    }
}

/// An object instance with named fields
pub struct Record {
    type_name: Rc<str>,
    supertypes: Vec<Rc<str>>,
    fields: RefCell<Vec<Field>>,
}

impl Record {
    /// Start building a record of the given runtime type
    pub fn builder(type_name: impl AsRef<str>) -> RecordBuilder {
        RecordBuilder {
            type_name: Rc::from(type_name.as_ref()),
            supertypes: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Supertypes in declaration order, nearest first
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.supertypes.iter().map(|s| &**s)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<Rc<str>> {
        self.fields
            .borrow()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    /// Look up a declared field by its exact name
    pub fn field(&self, name: &str) -> Option<Field> {
        self.fields
            .borrow()
            .iter()
            .find(|f| &*f.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.fields.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.borrow().is_empty()
    }

    /// Store `value` under `name`, keeping the existing visibility and
    /// position when the field is already declared.
    ///
    /// This is how cyclic graphs are closed after construction.
    pub fn set_field(&self, name: &str, value: impl Comparable) {
        let mut fields = self.fields.borrow_mut();
        let slot = FieldSlot::Stored(value.to_value());
        match fields.iter_mut().find(|f| &*f.name == name) {
            Some(field) => field.slot = slot,
            None => fields.push(Field {
                name: Rc::from(name),
                visibility: Visibility::Public,
                slot,
            }),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type_name", &&*self.type_name)
            .field("fields", &self.fields.borrow())
            .finish()
    }
}

/// Builder for [`Record`]
pub struct RecordBuilder {
    type_name: Rc<str>,
    supertypes: Vec<Rc<str>>,
    fields: Vec<Field>,
}

impl RecordBuilder {
    /// Declare a supertype; earlier declarations are nearer
    pub fn supertype(mut self, name: impl AsRef<str>) -> Self {
        self.supertypes.push(Rc::from(name.as_ref()));
        self
    }

    pub fn field(self, name: impl AsRef<str>, value: impl Comparable) -> Self {
        self.declare(name, Visibility::Public, FieldSlot::Stored(value.to_value()))
    }

    pub fn protected_field(self, name: impl AsRef<str>, value: impl Comparable) -> Self {
        self.declare(name, Visibility::Protected, FieldSlot::Stored(value.to_value()))
    }

    pub fn private_field(self, name: impl AsRef<str>, value: impl Comparable) -> Self {
        self.declare(name, Visibility::Private, FieldSlot::Stored(value.to_value()))
    }

    /// Declare a computed field (an accessor method)
    pub fn computed<F>(self, name: impl AsRef<str>, property: F) -> Self
    where
        F: Fn() -> Result<Value, AccessError> + 'static,
    {
        self.declare(name, Visibility::Public, FieldSlot::Computed(Rc::new(property)))
    }

    fn declare(mut self, name: impl AsRef<str>, visibility: Visibility, slot: FieldSlot) -> Self {
        let name: Rc<str> = Rc::from(name.as_ref());
        let field = Field {
            name,
            visibility,
            slot,
        };
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn build(self) -> Rc<Record> {
        Rc::new(Record {
            type_name: self.type_name,
            supertypes: self.supertypes,
            fields: RefCell::new(self.fields),
        })
    }

    /// Build and wrap as a [`Value`]
    pub fn build_value(self) -> Value {
        Value::Record(self.build())
    }
}
