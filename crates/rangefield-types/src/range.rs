//! Immutable range values
//!
//! A [`Range`] stores its endpoints as given together with their inclusive
//! flags. The effective closed bounds are computed on demand by applying the
//! domain's successor/predecessor to exclusive endpoints.

use rangefield_diagnostics::{RangeError, Result};
use serde::Serialize;
use std::fmt;

use crate::{RangeDomain, RangeValue};

/// Separator between endpoints in the canonical rendering
const SEPARATOR: &str = " : ";

/// A validated interval over one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    domain: RangeDomain,
    from: RangeValue,
    to: RangeValue,
    include_from: bool,
    include_to: bool,
}

impl Range {
    /// Build a range, validating that it denotes at least one value.
    ///
    /// An absent endpoint becomes the domain's `MIN`/`MAX` and is always
    /// inclusive, whatever flag was passed for it.
    pub fn new(
        domain: RangeDomain,
        from: Option<RangeValue>,
        to: Option<RangeValue>,
        include_from: bool,
        include_to: bool,
    ) -> Result<Self> {
        for value in from.iter().chain(to.iter()) {
            if !domain.contains(value) {
                return Err(RangeError::invalid_value(
                    domain.name(),
                    value,
                    format!("value belongs to [{}]", value.domain()),
                ));
            }
        }

        let (from, include_from) = match from {
            Some(value) => (value.canonical(), include_from),
            None => (domain.min_value(), true),
        };
        let (to, include_to) = match to {
            Some(value) => (value.canonical(), include_to),
            None => (domain.max_value(), true),
        };

        let range = Self {
            domain,
            from,
            to,
            include_from,
            include_to,
        };

        if from == to && !(include_from && include_to) {
            return Err(RangeError::empty_range(range.render_raw()));
        }
        let (lo, hi) = range
            .checked_bounds()
            .ok_or_else(|| RangeError::empty_range(range.render_raw()))?;
        if lo > hi {
            return Err(RangeError::range_order(lo, hi));
        }
        Ok(range)
    }

    /// Build a range from inclusive endpoints
    pub fn closed(domain: RangeDomain, from: RangeValue, to: RangeValue) -> Result<Self> {
        Self::new(domain, Some(from), Some(to), true, true)
    }

    /// The range covering the whole domain
    pub fn unbounded(domain: RangeDomain) -> Self {
        Self {
            domain,
            from: domain.min_value(),
            to: domain.max_value(),
            include_from: true,
            include_to: true,
        }
    }

    pub fn domain(&self) -> RangeDomain {
        self.domain
    }

    /// Stored lower endpoint (before exclusivity is applied)
    pub fn from(&self) -> RangeValue {
        self.from
    }

    /// Stored upper endpoint (before exclusivity is applied)
    pub fn to(&self) -> RangeValue {
        self.to
    }

    pub fn include_from(&self) -> bool {
        self.include_from
    }

    pub fn include_to(&self) -> bool {
        self.include_to
    }

    /// Effective inclusive bounds `(from', to')`
    pub fn closed_bounds(&self) -> (RangeValue, RangeValue) {
        let lo = if self.include_from {
            self.from
        } else {
            self.domain.successor(&self.from)
        };
        let hi = if self.include_to {
            self.to
        } else {
            self.domain.predecessor(&self.to)
        };
        (lo, hi)
    }

    /// Point membership against the effective bounds
    pub fn contains_value(&self, value: &RangeValue) -> bool {
        if !self.domain.contains(value) {
            return false;
        }
        let (lo, hi) = self.closed_bounds();
        lo <= *value && *value <= hi
    }

    /// Parse the canonical rendering back into a range.
    ///
    /// Accepts `[a : b]`, with `(` or `)` marking an exclusive endpoint.
    pub fn parse_canonical(domain: RangeDomain, text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let malformed = || {
            RangeError::invalid_value(domain.name(), text, "expected a range of the form [from : to]")
        };

        let include_from = match trimmed.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(malformed()),
        };
        let include_to = match trimmed.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(malformed()),
        };
        let inner = trimmed
            .get(1..trimmed.len() - 1)
            .ok_or_else(malformed)?;
        let (from, to) = inner.split_once(SEPARATOR).ok_or_else(malformed)?;

        let from = RangeValue::parse_canonical(domain, from)?;
        let to = RangeValue::parse_canonical(domain, to)?;
        Self::new(domain, Some(from), Some(to), include_from, include_to)
    }

    fn checked_bounds(&self) -> Option<(RangeValue, RangeValue)> {
        let lo = if self.include_from {
            self.from
        } else {
            self.domain.checked_successor(&self.from)?
        };
        let hi = if self.include_to {
            self.to
        } else {
            self.domain.checked_predecessor(&self.to)?
        };
        Some((lo, hi))
    }

    fn render_raw(&self) -> String {
        format!(
            "{}{}{}{}{}",
            if self.include_from { '[' } else { '(' },
            self.from,
            SEPARATOR,
            self.to,
            if self.include_to { ']' } else { ')' },
        )
    }
}

/// Canonical closed rendering of the effective bounds
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.closed_bounds();
        write!(f, "[{}{}{}]", lo, SEPARATOR, hi)
    }
}
