//! Fields produced for one range value

use rangefield_types::RangeValue;
use serde::Serialize;
use smallvec::SmallVec;

/// A field emitted when indexing a range value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RangeField {
    /// Closed bounds for the index
    Indexed {
        name: String,
        lower: RangeValue,
        upper: RangeValue,
    },
    /// Canonical string kept as the raw stored value
    Stored { name: String, text: String },
}

/// At most one indexed and one stored field per value
pub type RangeFields = SmallVec<[RangeField; 2]>;

/// Receives stored field copies.
pub trait StoredFieldSink {
    fn store(&mut self, field: &str, canonical: String);
}

impl StoredFieldSink for Vec<(String, String)> {
    fn store(&mut self, field: &str, canonical: String) {
        self.push((field.to_string(), canonical));
    }
}
