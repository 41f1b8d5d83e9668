pub mod comparable;
pub mod record;
pub mod value;

pub use comparable::Comparable;
pub use record::{Field, FieldSlot, PropertyFn, Record, RecordBuilder, Visibility};
pub use value::{ContainerKind, Elements, Entries, Value};
