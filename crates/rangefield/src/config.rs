//! Field mapping properties

use rangefield_diagnostics::{RangeError, Result};
use rangefield_types::RangeDomain;
use serde::{Deserialize, Serialize};

/// Mapping properties of a range field, as they appear in a mapping document.
///
/// ```json
/// {"type": "date_range", "coerce": false, "store": true}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeFieldConfig {
    #[serde(rename = "type")]
    pub domain: RangeDomain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coerce: Option<bool>,
    #[serde(default = "default_index")]
    pub index: bool,
    #[serde(default)]
    pub store: bool,
    #[serde(default = "default_boost")]
    pub boost: f32,
    /// Only `false` is accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_values: Option<bool>,
    /// Never accepted; ranges have no null value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_value: Option<serde_json::Value>,
}

fn default_index() -> bool {
    true
}

fn default_boost() -> f32 {
    1.0
}

impl RangeFieldConfig {
    /// Minimal configuration for `domain`
    pub fn new(domain: RangeDomain) -> Self {
        Self {
            domain,
            coerce: None,
            index: default_index(),
            store: false,
            boost: default_boost(),
            doc_values: None,
            null_value: None,
        }
    }

    /// Deserialize the properties of field `name`
    pub fn from_json(name: &str, value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|err| RangeError::mapping(name, err.to_string()))
    }
}
