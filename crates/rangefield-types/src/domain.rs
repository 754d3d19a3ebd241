//! Range domains and their strategy tables
//!
//! Each [`RangeDomain`] is backed by a `static` [`DomainTable`] holding its
//! external name, its `MIN`/`MAX` sentinels and the function pointers that
//! implement stepping and coercion. Dispatch is a single table lookup.

use rangefield_diagnostics::{RangeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use crate::coercion::{coerce_date, coerce_double, coerce_float, coerce_int, coerce_ip, coerce_long};
use crate::{CoerceContext, Coercion, RangeRelation, RangeToken, RangeValue};

/// Stepping function: `None` at the domain edge or for a foreign value.
pub type StepFn = fn(&RangeValue) -> Option<RangeValue>;

/// Coercion function for one domain.
pub type CoerceFn = fn(&RangeToken, &CoerceContext<'_>) -> Result<Coercion>;

/// Static strategy for one domain.
pub struct DomainTable {
    /// External type tag
    pub name: &'static str,
    /// Lower sentinel used for an absent lower bound
    pub min: RangeValue,
    /// Upper sentinel used for an absent upper bound
    pub max: RangeValue,
    /// Next representable value
    pub next_up: StepFn,
    /// Previous representable value
    pub next_down: StepFn,
    /// Token coercion
    pub coerce: CoerceFn,
}

impl fmt::Debug for DomainTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainTable")
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

static INT32: DomainTable = DomainTable {
    name: "int_range",
    min: RangeValue::Int(i32::MIN),
    max: RangeValue::Int(i32::MAX),
    next_up: int_up,
    next_down: int_down,
    coerce: coerce_int,
};

static INT64: DomainTable = DomainTable {
    name: "long_range",
    min: RangeValue::Long(i64::MIN),
    max: RangeValue::Long(i64::MAX),
    next_up: long_up,
    next_down: long_down,
    coerce: coerce_long,
};

static FLOAT32: DomainTable = DomainTable {
    name: "float_range",
    min: RangeValue::Float(f32::NEG_INFINITY),
    max: RangeValue::Float(f32::INFINITY),
    next_up: float_up,
    next_down: float_down,
    coerce: coerce_float,
};

static FLOAT64: DomainTable = DomainTable {
    name: "double_range",
    min: RangeValue::Double(f64::NEG_INFINITY),
    max: RangeValue::Double(f64::INFINITY),
    next_up: double_up,
    next_down: double_down,
    coerce: coerce_double,
};

static TIMESTAMP: DomainTable = DomainTable {
    name: "date_range",
    min: RangeValue::Date(i64::MIN),
    max: RangeValue::Date(i64::MAX),
    next_up: date_up,
    next_down: date_down,
    coerce: coerce_date,
};

static IP_ADDRESS: DomainTable = DomainTable {
    name: "ip_range",
    min: RangeValue::Ip(Ipv6Addr::UNSPECIFIED),
    max: RangeValue::Ip(Ipv6Addr::new(
        0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0xffff,
    )),
    next_up: ip_up,
    next_down: ip_down,
    coerce: coerce_ip,
};

fn int_up(value: &RangeValue) -> Option<RangeValue> {
    value.as_int()?.checked_add(1).map(RangeValue::Int)
}

fn int_down(value: &RangeValue) -> Option<RangeValue> {
    value.as_int()?.checked_sub(1).map(RangeValue::Int)
}

fn long_up(value: &RangeValue) -> Option<RangeValue> {
    match value {
        RangeValue::Long(l) => l.checked_add(1).map(RangeValue::Long),
        _ => None,
    }
}

fn long_down(value: &RangeValue) -> Option<RangeValue> {
    match value {
        RangeValue::Long(l) => l.checked_sub(1).map(RangeValue::Long),
        _ => None,
    }
}

fn date_up(value: &RangeValue) -> Option<RangeValue> {
    match value {
        RangeValue::Date(ms) => ms.checked_add(1).map(RangeValue::Date),
        _ => None,
    }
}

fn date_down(value: &RangeValue) -> Option<RangeValue> {
    match value {
        RangeValue::Date(ms) => ms.checked_sub(1).map(RangeValue::Date),
        _ => None,
    }
}

// Infinities are the sentinels, so stepping past them is the edge.
// Zero is unsigned: `-0.0` steps like `0.0` and a step never lands on `-0.0`.
fn float_up(value: &RangeValue) -> Option<RangeValue> {
    match value.canonical() {
        RangeValue::Float(f) if f != f32::INFINITY => Some(RangeValue::float(f.next_up())),
        _ => None,
    }
}

fn float_down(value: &RangeValue) -> Option<RangeValue> {
    match value.canonical() {
        RangeValue::Float(f) if f != f32::NEG_INFINITY => Some(RangeValue::float(f.next_down())),
        _ => None,
    }
}

fn double_up(value: &RangeValue) -> Option<RangeValue> {
    match value.canonical() {
        RangeValue::Double(d) if d != f64::INFINITY => Some(RangeValue::double(d.next_up())),
        _ => None,
    }
}

fn double_down(value: &RangeValue) -> Option<RangeValue> {
    match value.canonical() {
        RangeValue::Double(d) if d != f64::NEG_INFINITY => Some(RangeValue::double(d.next_down())),
        _ => None,
    }
}

fn ip_up(value: &RangeValue) -> Option<RangeValue> {
    match value {
        RangeValue::Ip(addr) => u128::from(*addr)
            .checked_add(1)
            .map(|bits| RangeValue::Ip(Ipv6Addr::from(bits))),
        _ => None,
    }
}

fn ip_down(value: &RangeValue) -> Option<RangeValue> {
    match value {
        RangeValue::Ip(addr) => u128::from(*addr)
            .checked_sub(1)
            .map(|bits| RangeValue::Ip(Ipv6Addr::from(bits))),
        _ => None,
    }
}

/// The six ordered value domains a range can be defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RangeDomain {
    /// 32-bit signed integer
    #[serde(rename = "int_range", alias = "integer_range")]
    Int32,
    /// 64-bit signed integer
    #[serde(rename = "long_range")]
    Int64,
    /// Single-precision float
    #[serde(rename = "float_range")]
    Float32,
    /// Double-precision float
    #[serde(rename = "double_range")]
    Float64,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "date_range")]
    Timestamp,
    /// IPv4 or IPv6 address, ordered as unsigned 128-bit
    #[serde(rename = "ip_range")]
    IpAddress,
}

impl RangeDomain {
    const ALL: [RangeDomain; 6] = [
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Timestamp,
        Self::IpAddress,
    ];

    /// Every domain, in declaration order
    pub fn all() -> &'static [RangeDomain] {
        &Self::ALL
    }

    /// The static strategy table for this domain
    pub fn table(self) -> &'static DomainTable {
        match self {
            Self::Int32 => &INT32,
            Self::Int64 => &INT64,
            Self::Float32 => &FLOAT32,
            Self::Float64 => &FLOAT64,
            Self::Timestamp => &TIMESTAMP,
            Self::IpAddress => &IP_ADDRESS,
        }
    }

    /// External type tag, e.g. `"long_range"`
    pub fn name(self) -> &'static str {
        self.table().name
    }

    /// Smallest value of the domain
    pub fn min_value(self) -> RangeValue {
        self.table().min
    }

    /// Largest value of the domain
    pub fn max_value(self) -> RangeValue {
        self.table().max
    }

    /// Whether `value` belongs to this domain
    pub fn contains(self, value: &RangeValue) -> bool {
        value.domain() == self
    }

    /// Next representable value, or `None` at `MAX` (or for a foreign value)
    pub fn checked_successor(self, value: &RangeValue) -> Option<RangeValue> {
        if !self.contains(value) {
            return None;
        }
        (self.table().next_up)(value)
    }

    /// Previous representable value, or `None` at `MIN` (or for a foreign value)
    pub fn checked_predecessor(self, value: &RangeValue) -> Option<RangeValue> {
        if !self.contains(value) {
            return None;
        }
        (self.table().next_down)(value)
    }

    /// Saturating successor: the identity at `MAX`
    pub fn successor(self, value: &RangeValue) -> RangeValue {
        self.checked_successor(value).unwrap_or(*value)
    }

    /// Saturating predecessor: the identity at `MIN`
    pub fn predecessor(self, value: &RangeValue) -> RangeValue {
        self.checked_predecessor(value).unwrap_or(*value)
    }

    /// Convert a raw token into a value of this domain
    pub fn coerce(self, token: &RangeToken, ctx: &CoerceContext<'_>) -> Result<Coercion> {
        (self.table().coerce)(token, ctx)
    }

    /// Whether range queries on this domain can use `relation`
    pub fn supports(self, relation: RangeRelation) -> bool {
        !matches!(relation, RangeRelation::Disjoint)
    }
}

impl fmt::Display for RangeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeDomain {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "integer_range" => Ok(Self::Int32),
            _ => Self::ALL
                .into_iter()
                .find(|domain| domain.name() == s)
                .ok_or_else(|| RangeError::mapping(s, format!("no range domain named [{}]", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for domain in RangeDomain::all() {
            assert_eq!(domain.name().parse::<RangeDomain>().unwrap(), *domain);
        }
        assert_eq!("integer_range".parse::<RangeDomain>().unwrap(), RangeDomain::Int32);
        assert!("geo_range".parse::<RangeDomain>().is_err());
    }

    #[test]
    fn test_sentinels_belong_to_domain() {
        for domain in RangeDomain::all() {
            assert!(domain.contains(&domain.min_value()));
            assert!(domain.contains(&domain.max_value()));
            assert!(domain.min_value() < domain.max_value());
        }
    }

    #[test]
    fn test_foreign_value_is_not_stepped() {
        assert_eq!(RangeDomain::Int64.checked_successor(&RangeValue::Date(1)), None);
        assert_eq!(RangeDomain::Timestamp.successor(&RangeValue::Date(1)), RangeValue::Date(2));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&RangeDomain::IpAddress).unwrap(), "\"ip_range\"");
        let domain: RangeDomain = serde_json::from_str("\"integer_range\"").unwrap();
        assert_eq!(domain, RangeDomain::Int32);
    }
}
