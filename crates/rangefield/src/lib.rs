//! Range fields over ordered value domains
//!
//! This crate ties the range engine to field configuration:
//! - Index-wide settings and per-field mapping properties
//! - Parsing `{gt, gte, lt, lte}` field values into ranges
//! - Indexed and stored field creation
//! - Relation and term queries against a field
//!
//! # Example
//!
//! ```
//! use rangefield::{IndexSettings, RangeFieldTypeBuilder, RangeDomain};
//! use serde_json::json;
//!
//! let field = RangeFieldTypeBuilder::new("ages", RangeDomain::Int32)
//!     .store(true)
//!     .build(&IndexSettings::default())
//!     .unwrap();
//! let range = field.parse_value(&json!({"gte": 10, "lt": 20})).unwrap();
//! assert_eq!(range.to_string(), "[10 : 19]");
//! ```

pub mod config;
pub mod field;
pub mod fields;
pub mod input;
pub mod settings;

// Re-export the internal crates
pub use rangefield_diagnostics as diagnostics;
pub use rangefield_eval as eval;
pub use rangefield_types as types;

// Convenience re-exports
pub use config::RangeFieldConfig;
pub use field::{RangeFieldType, RangeFieldTypeBuilder};
pub use fields::{RangeField, RangeFields, StoredFieldSink};
pub use input::RangeInput;
pub use rangefield_diagnostics::{RangeError, Result};
pub use rangefield_eval::{QueryBounds, QueryContext, RangeEngine};
pub use rangefield_types::{Range, RangeDomain, RangeRelation, RangeToken, RangeValue};
pub use settings::{Explicit, IndexSettings};
