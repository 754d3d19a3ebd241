//! Range field values
//!
//! A field value is an object with at most one lower bound (`gt` or `gte`)
//! and at most one upper bound (`lt` or `lte`):
//!
//! ```json
//! {"gte": "2024-01-01", "lt": "2024-02-01"}
//! ```
//!
//! A `null` bound is the same as an absent one.

use rangefield_diagnostics::{RangeError, Result};
use rangefield_types::RangeToken;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<RangeToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<RangeToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<RangeToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<RangeToken>,
}

impl RangeInput {
    /// Read the value of field `field`
    pub fn from_json(field: &str, value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(RangeError::mapping(
                field,
                format!("range value must be an object, found [{}]", value),
            ));
        }
        let input: Self =
            serde_json::from_value(value.clone()).map_err(|err| RangeError::mapping(field, err.to_string()))?;
        input.validate(field)?;
        Ok(input)
    }

    /// Reject a bound given both inclusively and exclusively
    pub fn validate(&self, field: &str) -> Result<()> {
        if self.gt.is_some() && self.gte.is_some() {
            return Err(RangeError::mapping(field, "only one of [gt] and [gte] may be given"));
        }
        if self.lt.is_some() && self.lte.is_some() {
            return Err(RangeError::mapping(field, "only one of [lt] and [lte] may be given"));
        }
        Ok(())
    }

    /// Lower bound token and whether it is inclusive
    pub fn lower(&self) -> (Option<&RangeToken>, bool) {
        match (&self.gt, &self.gte) {
            (Some(token), _) => (Some(token), false),
            (None, gte) => (gte.as_ref(), true),
        }
    }

    /// Upper bound token and whether it is inclusive
    pub fn upper(&self) -> (Option<&RangeToken>, bool) {
        match (&self.lt, &self.lte) {
            (Some(token), _) => (Some(token), false),
            (None, lte) => (lte.as_ref(), true),
        }
    }
}
