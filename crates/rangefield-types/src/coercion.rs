//! Token coercion rules
//!
//! This module turns raw [`RangeToken`]s into domain values:
//! - Integer domains read whole numbers and numeric text (exactly, through
//!   `Decimal`), truncating fractions only when coercion is allowed
//! - Float domains read any finite number; `NaN` and infinities are rejected
//! - The timestamp domain reads integers as epoch milliseconds and hands text
//!   to an [`InstantResolver`]
//! - The IP domain reads textual IPv4/IPv6 addresses

use chrono::{FixedOffset, Offset, Utc};
use rangefield_diagnostics::{RangeError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::net::IpAddr;
use std::str::FromStr;

use crate::{RangeDomain, RangeToken, RangeValue};

/// Outcome of a successful coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coercion {
    /// The domain value
    pub value: RangeValue,
    /// Whether a fractional part was dropped to produce `value`
    pub truncated: bool,
}

impl Coercion {
    fn exact(value: RangeValue) -> Self {
        Self {
            value,
            truncated: false,
        }
    }
}

/// Resolves date literals and date-math expressions to epoch milliseconds.
///
/// `now` is the reference time for `now`-anchored expressions. When it is
/// `None` an implementation must fail with [`RangeError::NowNotAllowed`] if
/// the expression refers to `now`.
pub trait InstantResolver: Send + Sync {
    /// Resolve `text` to milliseconds since the epoch
    fn resolve(&self, text: &str, now: Option<i64>, zone: FixedOffset) -> Result<i64>;
}

/// Minimal resolver that only understands epoch milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpochMillisResolver;

impl InstantResolver for EpochMillisResolver {
    fn resolve(&self, text: &str, now: Option<i64>, _zone: FixedOffset) -> Result<i64> {
        let trimmed = text.trim();
        if trimmed.starts_with("now") {
            return match now {
                Some(now) if trimmed == "now" => Ok(now),
                Some(_) => Err(RangeError::parse(text, "date math is not supported")),
                None => Err(RangeError::now_not_allowed(text, "no reference time is available")),
            };
        }
        trimmed
            .parse()
            .map_err(|_| RangeError::parse(text, "expected epoch milliseconds"))
    }
}

static EPOCH_MILLIS: EpochMillisResolver = EpochMillisResolver;

/// Everything a domain needs to coerce one token.
#[derive(Clone, Copy)]
pub struct CoerceContext<'a> {
    allow_coerce: bool,
    resolver: &'a dyn InstantResolver,
    now: Option<i64>,
    zone: FixedOffset,
}

impl<'a> CoerceContext<'a> {
    /// Strict context: no truncation, no reference time, UTC
    pub fn new(resolver: &'a dyn InstantResolver) -> Self {
        Self {
            allow_coerce: false,
            resolver,
            now: None,
            zone: Utc.fix(),
        }
    }

    /// Allow fractional values to be truncated
    pub fn allow_coerce(mut self, allow: bool) -> Self {
        self.allow_coerce = allow;
        self
    }

    /// Set the reference time for `now` expressions
    pub fn with_now(mut self, now: Option<i64>) -> Self {
        self.now = now;
        self
    }

    /// Set the zone used for date literals without an explicit offset
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    /// Whether truncation is allowed
    pub fn coerce_allowed(&self) -> bool {
        self.allow_coerce
    }

    /// The reference time, if any
    pub fn now(&self) -> Option<i64> {
        self.now
    }

    /// The default zone
    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    fn resolve_instant(&self, text: &str) -> Result<i64> {
        self.resolver.resolve(text, self.now, self.zone)
    }
}

impl Default for CoerceContext<'static> {
    fn default() -> Self {
        Self::new(&EPOCH_MILLIS)
    }
}

impl std::fmt::Debug for CoerceContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoerceContext")
            .field("allow_coerce", &self.allow_coerce)
            .field("now", &self.now)
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Per-domain coercion (wired into the domain tables)
// ============================================================================

pub(crate) fn coerce_int(token: &RangeToken, ctx: &CoerceContext<'_>) -> Result<Coercion> {
    let (whole, truncated) = whole_number(RangeDomain::Int32, token, ctx)?;
    let value = whole.to_i32().ok_or_else(|| {
        RangeError::invalid_value(RangeDomain::Int32.name(), token, "out of range for an integer")
    })?;
    Ok(Coercion {
        value: RangeValue::Int(value),
        truncated,
    })
}

pub(crate) fn coerce_long(token: &RangeToken, ctx: &CoerceContext<'_>) -> Result<Coercion> {
    let (whole, truncated) = whole_number(RangeDomain::Int64, token, ctx)?;
    let value = whole.to_i64().ok_or_else(|| {
        RangeError::invalid_value(RangeDomain::Int64.name(), token, "out of range for a long")
    })?;
    Ok(Coercion {
        value: RangeValue::Long(value),
        truncated,
    })
}

pub(crate) fn coerce_float(token: &RangeToken, _ctx: &CoerceContext<'_>) -> Result<Coercion> {
    let domain = RangeDomain::Float32;
    let value = match token {
        RangeToken::Int(i) => *i as f32,
        RangeToken::Float(d) => *d as f32,
        RangeToken::Text(s) => s
            .trim()
            .parse::<f32>()
            .map_err(|_| RangeError::invalid_value(domain.name(), token, "not a number"))?,
        RangeToken::Bool(_) => return Err(wrong_kind(domain, token)),
    };
    if !value.is_finite() {
        return Err(RangeError::invalid_value(domain.name(), token, "only finite values are supported"));
    }
    Ok(Coercion::exact(RangeValue::float(value)))
}

pub(crate) fn coerce_double(token: &RangeToken, _ctx: &CoerceContext<'_>) -> Result<Coercion> {
    let domain = RangeDomain::Float64;
    let value = match token {
        RangeToken::Int(i) => *i as f64,
        RangeToken::Float(d) => *d,
        RangeToken::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| RangeError::invalid_value(domain.name(), token, "not a number"))?,
        RangeToken::Bool(_) => return Err(wrong_kind(domain, token)),
    };
    if !value.is_finite() {
        return Err(RangeError::invalid_value(domain.name(), token, "only finite values are supported"));
    }
    Ok(Coercion::exact(RangeValue::double(value)))
}

pub(crate) fn coerce_date(token: &RangeToken, ctx: &CoerceContext<'_>) -> Result<Coercion> {
    let domain = RangeDomain::Timestamp;
    match token {
        RangeToken::Int(millis) => Ok(Coercion::exact(RangeValue::Date(*millis))),
        RangeToken::Float(_) => {
            let (whole, truncated) = whole_number(domain, token, ctx)?;
            let millis = whole.to_i64().ok_or_else(|| {
                RangeError::invalid_value(domain.name(), token, "out of range for a timestamp")
            })?;
            Ok(Coercion {
                value: RangeValue::Date(millis),
                truncated,
            })
        }
        RangeToken::Text(text) => ctx.resolve_instant(text).map(|millis| Coercion::exact(RangeValue::Date(millis))),
        RangeToken::Bool(_) => Err(wrong_kind(domain, token)),
    }
}

pub(crate) fn coerce_ip(token: &RangeToken, _ctx: &CoerceContext<'_>) -> Result<Coercion> {
    let domain = RangeDomain::IpAddress;
    match token {
        RangeToken::Text(s) => s
            .trim()
            .parse::<IpAddr>()
            .map(|addr| Coercion::exact(RangeValue::ip(addr)))
            .map_err(|_| RangeError::invalid_value(domain.name(), token, "not an IP string literal")),
        _ => Err(wrong_kind(domain, token)),
    }
}

/// Read a token as a whole number, truncating toward zero when allowed.
fn whole_number(domain: RangeDomain, token: &RangeToken, ctx: &CoerceContext<'_>) -> Result<(Decimal, bool)> {
    let decimal = match token {
        RangeToken::Int(i) => return Ok((Decimal::from(*i), false)),
        RangeToken::Float(f) => {
            if !f.is_finite() {
                return Err(RangeError::invalid_value(domain.name(), token, "not a finite number"));
            }
            Decimal::from_f64_retain(*f)
                .ok_or_else(|| RangeError::invalid_value(domain.name(), token, "number out of range"))?
        }
        RangeToken::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .map_err(|_| RangeError::invalid_value(domain.name(), token, "not a number"))?
        }
        RangeToken::Bool(_) => return Err(wrong_kind(domain, token)),
    };

    if decimal.fract().is_zero() {
        return Ok((decimal, false));
    }
    if !ctx.coerce_allowed() {
        return Err(RangeError::invalid_value(domain.name(), token, "value has a decimal part"));
    }
    Ok((decimal.trunc(), true))
}

fn wrong_kind(domain: RangeDomain, token: &RangeToken) -> RangeError {
    let kind = match token {
        RangeToken::Int(_) | RangeToken::Float(_) => "a number",
        RangeToken::Bool(_) => "a boolean",
        RangeToken::Text(_) => "text",
    };
    RangeError::invalid_value(domain.name(), token, format!("{} cannot be {}", domain.name(), kind))
}
