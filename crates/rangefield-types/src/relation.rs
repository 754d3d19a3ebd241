//! Set relations between a query range and an indexed range

use rangefield_diagnostics::{RangeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relation between query `Q = [ql, qh]` and indexed `R = [rl, rh]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeRelation {
    /// `rl <= qh && rh >= ql`
    #[default]
    Intersects,
    /// `rl >= ql && rh <= qh`
    Within,
    /// `rl <= ql && rh >= qh`
    Contains,
    /// Known relation name that no range domain can evaluate
    Disjoint,
}

impl RangeRelation {
    /// Lowercase relation name
    pub fn name(self) -> &'static str {
        match self {
            Self::Intersects => "intersects",
            Self::Within => "within",
            Self::Contains => "contains",
            Self::Disjoint => "disjoint",
        }
    }
}

impl fmt::Display for RangeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeRelation {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "intersects" => Ok(Self::Intersects),
            "within" => Ok(Self::Within),
            "contains" => Ok(Self::Contains),
            "disjoint" => Ok(Self::Disjoint),
            _ => Err(RangeError::unsupported_relation(s, "range")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("WITHIN".parse::<RangeRelation>().unwrap(), RangeRelation::Within);
        assert_eq!("Contains".parse::<RangeRelation>().unwrap(), RangeRelation::Contains);
        assert!(matches!(
            "overlaps".parse::<RangeRelation>(),
            Err(RangeError::UnsupportedRelation { .. })
        ));
    }

    #[test]
    fn test_default_is_intersects() {
        assert_eq!(RangeRelation::default(), RangeRelation::Intersects);
    }
}
