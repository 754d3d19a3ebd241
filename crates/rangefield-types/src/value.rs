//! Range endpoint values - native representation of every domain's points
//!
//! A [`RangeValue`] always knows which [`RangeDomain`] it belongs to, so a
//! range can verify that both of its endpoints come from the same domain.

use rangefield_diagnostics::{RangeError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

use crate::RangeDomain;

/// A single endpoint value in one of the supported domains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RangeValue {
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// Single-precision float
    Float(f32),
    /// Double-precision float
    Double(f64),
    /// Milliseconds since the Unix epoch
    Date(i64),
    /// IP address; IPv4 addresses are stored in their IPv4-mapped form
    Ip(Ipv6Addr),
}

impl RangeValue {
    /// Get the domain this value belongs to
    pub fn domain(&self) -> RangeDomain {
        match self {
            Self::Int(_) => RangeDomain::Int32,
            Self::Long(_) => RangeDomain::Int64,
            Self::Float(_) => RangeDomain::Float32,
            Self::Double(_) => RangeDomain::Float64,
            Self::Date(_) => RangeDomain::Timestamp,
            Self::Ip(_) => RangeDomain::IpAddress,
        }
    }

    /// Create an IP value, mapping IPv4 into the IPv6 space
    pub fn ip(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::Ip(v4.to_ipv6_mapped()),
            IpAddr::V6(v6) => Self::Ip(v6),
        }
    }

    /// Create a Float value; `-0.0` folds into `0.0`
    pub fn float(value: f32) -> Self {
        Self::Float(if value == 0.0 { 0.0 } else { value })
    }

    /// Create a Double value; `-0.0` folds into `0.0`
    pub fn double(value: f64) -> Self {
        Self::Double(if value == 0.0 { 0.0 } else { value })
    }

    /// The same value with float zeros folded to `0.0`
    pub fn canonical(self) -> Self {
        match self {
            Self::Float(f) => Self::float(f),
            Self::Double(d) => Self::double(d),
            other => other,
        }
    }

    /// Try to get as Int
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as Long (also covers timestamps)
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(l) | Self::Date(l) => Some(*l),
            _ => None,
        }
    }

    /// Try to get as Double (also widens Float)
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(f64::from(*f)),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get as an IP address, unmapping IPv4-mapped addresses
    pub fn as_ip(&self) -> Option<IpAddr> {
        match self {
            Self::Ip(v6) => Some(match v6.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => IpAddr::V6(*v6),
            }),
            _ => None,
        }
    }

    /// Parse the textual form produced by `Display` back into a value of `domain`.
    ///
    /// Unlike coercion this accepts the infinite float sentinels, since they
    /// appear in the canonical rendering of unbounded ranges.
    pub fn parse_canonical(domain: RangeDomain, text: &str) -> Result<Self> {
        let text = text.trim();
        let invalid = |reason: &str| RangeError::invalid_value(domain.name(), text, reason);
        match domain {
            RangeDomain::Int32 => text.parse().map(Self::Int).map_err(|_| invalid("not an integer")),
            RangeDomain::Int64 => text.parse().map(Self::Long).map_err(|_| invalid("not a long")),
            RangeDomain::Timestamp => text
                .parse()
                .map(Self::Date)
                .map_err(|_| invalid("not an epoch millisecond timestamp")),
            RangeDomain::Float32 => match text.parse::<f32>() {
                Ok(f) if !f.is_nan() => Ok(Self::float(f)),
                _ => Err(invalid("not a float")),
            },
            RangeDomain::Float64 => match text.parse::<f64>() {
                Ok(d) if !d.is_nan() => Ok(Self::double(d)),
                _ => Err(invalid("not a double")),
            },
            RangeDomain::IpAddress => text
                .parse::<IpAddr>()
                .map(Self::ip)
                .map_err(|_| invalid("not an IP address")),
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Long(_) => 1,
            Self::Float(_) => 2,
            Self::Double(_) => 3,
            Self::Date(_) => 4,
            Self::Ip(_) => 5,
        }
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Long(l) | Self::Date(l) => write!(f, "{}", l),
            // Debug keeps a trailing ".0" and is the shortest round-trippable form
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Double(v) => write!(f, "{:?}", v),
            Self::Ip(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => write!(f, "{}", v4),
                None => write!(f, "{}", v6),
            },
        }
    }
}

/// Floats use the IEEE-754 total order; values built through the
/// constructors never hold `-0.0`. Values of different domains order by domain.
impl Ord for RangeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Long(a), Self::Long(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Double(a), Self::Double(b)) => a.total_cmp(b),
            (Self::Ip(a), Self::Ip(b)) => u128::from(*a).cmp(&u128::from(*b)),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl PartialOrd for RangeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RangeValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RangeValue {}
