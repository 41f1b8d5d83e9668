//! deepeq core - recursive structural comparison of object graphs
//!
//! Two values are compared field by field, recursively, instead of through
//! their own equality. The result is a [`DifferenceReport`] naming every
//! divergence by its field path (`address.city`, `items[2]`, `map.key("a")`).
//!
//! - [`model`]: the dynamic value graph and the [`Comparable`] conversion trait
//! - [`config`]: immutable comparison settings and their builder
//! - [`walker`]: the comparison entry points
//! - [`report`]: differences and their rendering
//!
//! ```
//! use deepeq_core::{compare, ComparisonConfig, Record};
//!
//! let actual = Record::builder("Person").field("name", "Yoda").build_value();
//! let expected = Record::builder("Person").field("name", "Luke").build_value();
//! let report = compare(&actual, &expected, &ComparisonConfig::default()).unwrap();
//! assert_eq!(report.paths(), vec!["name"]);
//! ```

pub mod accessor;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod path;
pub mod registry;
pub mod report;
pub mod representation;
pub mod walker;

pub use deepeq_core_types::schema;

// Re-export commonly used types
pub use accessor::{normalize_field_name, FieldAccessor};
pub use config::{ComparisonConfig, ComparisonConfigBuilder, EqualityCheck, FieldLookup};
pub use errors::{AccessError, EngineError, EngineErrorKind, Result};
pub use model::{Comparable, ContainerKind, Record, Value, Visibility};
pub use path::{FieldPath, PathSegment};
pub use registry::{Strategy, StrategyRegistry};
pub use report::{Difference, DifferenceKind, DifferenceReport, DifferenceSummary};
pub use representation::{Representation, StandardRepresentation};
pub use walker::{are_equal, compare, compare_values};
