//! Date-math instant resolution
//!
//! Expressions have an anchor followed by optional math:
//!
//! ```text
//! now-1d/d
//! 2024-03-15||+1M
//! 2024-03-15T10:30:00+02:00
//! 1700000000000
//! ```
//!
//! The anchor is `now` or a literal; a literal is separated from its math by
//! `||`. Math is a sequence of `+N<unit>`, `-N<unit>` (N defaults to 1) and
//! `/<unit>` (round down), with units `y M w d h H m s`. Four-digit literals
//! are years; any other run of digits is epoch milliseconds.

use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    TimeZone, Timelike,
};
use rangefield_diagnostics::{RangeError, Result};
use rangefield_types::InstantResolver;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DATE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<year>\d{4})(?:-(?P<month>\d{2})(?:-(?P<day>\d{2})(?:[T ](?P<hour>\d{2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:\.(?P<fraction>\d{1,9}))?)?(?P<offset>Z|[+-]\d{2}:\d{2})?)?)?)?$",
    )
    .expect("date literal pattern is valid")
});

static EPOCH_MILLIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("epoch millis pattern is valid"));

static MATH_OP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<sign>[+-])(?P<amount>\d*)|/)(?P<unit>[yMwdhHms])")
        .expect("date math pattern is valid")
});

/// Default [`InstantResolver`]: ISO-8601 style literals plus date math.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateMathResolver;

impl DateMathResolver {
    pub fn new() -> Self {
        Self
    }
}

impl InstantResolver for DateMathResolver {
    fn resolve(&self, text: &str, now: Option<i64>, zone: FixedOffset) -> Result<i64> {
        let expression = text.trim();
        if expression.is_empty() {
            return Err(RangeError::parse(text, "empty date expression"));
        }

        let (anchor, math) = if let Some(math) = expression.strip_prefix("now") {
            let now = now.ok_or_else(|| {
                RangeError::now_not_allowed(text, "no reference time is available here")
            })?;
            (Anchor::Millis(now), math)
        } else {
            let (literal, math) = expression.split_once("||").unwrap_or((expression, ""));
            (parse_literal(text, literal, zone)?, math)
        };

        if math.is_empty() {
            return match anchor {
                Anchor::Millis(millis) => Ok(millis),
                Anchor::DateTime(dt) => Ok(dt.timestamp_millis()),
            };
        }

        let start = match anchor {
            Anchor::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.with_timezone(&zone))
                .ok_or_else(|| RangeError::parse(text, "anchor is outside the supported date range"))?,
            Anchor::DateTime(dt) => dt,
        };
        let resolved = apply_math(text, start, math)?;
        log::trace!("resolved date expression [{}] to {}", text, resolved);
        Ok(resolved.timestamp_millis())
    }
}

enum Anchor {
    Millis(i64),
    DateTime(DateTime<FixedOffset>),
}

fn parse_literal(text: &str, literal: &str, zone: FixedOffset) -> Result<Anchor> {
    if let Some(caps) = DATE_LITERAL.captures(literal) {
        return date_literal(text, &caps, zone).map(Anchor::DateTime);
    }
    if EPOCH_MILLIS.is_match(literal) {
        return literal
            .parse()
            .map(Anchor::Millis)
            .map_err(|_| RangeError::parse(text, "epoch milliseconds out of range"));
    }
    Err(RangeError::parse(text, format!("unrecognised date literal [{}]", literal)))
}

fn date_literal(text: &str, caps: &Captures<'_>, zone: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let field = |name: &str, default: u32| -> u32 {
        caps.name(name)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(default)
    };
    let year = caps
        .name("year")
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .ok_or_else(|| RangeError::parse(text, "missing year"))?;

    let date = NaiveDate::from_ymd_opt(year, field("month", 1), field("day", 1))
        .ok_or_else(|| RangeError::parse(text, "invalid calendar date"))?;

    let nanos = match caps.name("fraction") {
        Some(m) => format!("{:0<9}", m.as_str())
            .parse::<u32>()
            .map_err(|_| RangeError::parse(text, "invalid fractional seconds"))?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(field("hour", 0), field("minute", 0), field("second", 0), nanos)
        .ok_or_else(|| RangeError::parse(text, "invalid time of day"))?;

    let offset = match caps.name("offset").map(|m| m.as_str()) {
        None => zone,
        Some("Z") => FixedOffset::east_opt(0).ok_or_else(|| RangeError::parse(text, "invalid offset"))?,
        Some(raw) => parse_offset(text, raw)?,
    };
    localize(text, offset, NaiveDateTime::new(date, time))
}

fn parse_offset(text: &str, raw: &str) -> Result<FixedOffset> {
    let invalid = || RangeError::parse(text, format!("invalid zone offset [{}]", raw));
    let sign = if raw.starts_with('-') { -1 } else { 1 };
    let (hours, minutes) = raw
        .get(1..)
        .and_then(|rest| rest.split_once(':'))
        .ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn localize(text: &str, offset: FixedOffset, naive: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| RangeError::parse(text, "local time does not exist"))
}

fn apply_math(text: &str, start: DateTime<FixedOffset>, math: &str) -> Result<DateTime<FixedOffset>> {
    let mut current = start;
    let mut rest = math;

    while !rest.is_empty() {
        let caps = MATH_OP
            .captures(rest)
            .ok_or_else(|| RangeError::parse(text, format!("invalid date math [{}]", rest)))?;
        let unit = caps
            .name("unit")
            .and_then(|m| m.as_str().chars().next())
            .ok_or_else(|| RangeError::parse(text, "missing date math unit"))?;

        current = match caps.name("sign") {
            Some(sign) => {
                let amount = match caps.name("amount").map(|m| m.as_str()) {
                    Some("") | None => 1,
                    Some(digits) => digits
                        .parse::<u32>()
                        .map_err(|_| RangeError::parse(text, "date math amount out of range"))?,
                };
                shift(text, current, unit, amount, sign.as_str() == "-")?
            }
            None => round_down(text, current, unit)?,
        };
        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
    }
    Ok(current)
}

fn shift(
    text: &str,
    dt: DateTime<FixedOffset>,
    unit: char,
    amount: u32,
    negative: bool,
) -> Result<DateTime<FixedOffset>> {
    let overflow = || RangeError::parse(text, "date math overflows the supported date range");

    let months = match unit {
        'y' => Some(amount.checked_mul(12).ok_or_else(overflow)?),
        'M' => Some(amount),
        _ => None,
    };
    if let Some(months) = months {
        let months = Months::new(months);
        let shifted = if negative {
            dt.checked_sub_months(months)
        } else {
            dt.checked_add_months(months)
        };
        return shifted.ok_or_else(overflow);
    }

    let unit_seconds: i64 = match unit {
        'w' => 7 * 86_400,
        'd' => 86_400,
        'h' | 'H' => 3_600,
        'm' => 60,
        's' => 1,
        _ => return Err(RangeError::parse(text, format!("unknown date math unit [{}]", unit))),
    };
    let seconds = i64::from(amount).checked_mul(unit_seconds).ok_or_else(overflow)?;
    let delta = TimeDelta::try_seconds(if negative { -seconds } else { seconds }).ok_or_else(overflow)?;
    dt.checked_add_signed(delta).ok_or_else(overflow)
}

fn round_down(text: &str, dt: DateTime<FixedOffset>, unit: char) -> Result<DateTime<FixedOffset>> {
    let date = dt.date_naive();
    let time = dt.time();
    let invalid = || RangeError::parse(text, "cannot round date");

    let naive = match unit {
        'y' => NaiveDate::from_ymd_opt(date.year(), 1, 1)
            .ok_or_else(invalid)?
            .and_time(NaiveTime::MIN),
        'M' => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .ok_or_else(invalid)?
            .and_time(NaiveTime::MIN),
        'w' => {
            let back = TimeDelta::try_days(i64::from(date.weekday().num_days_from_monday())).ok_or_else(invalid)?;
            date.checked_sub_signed(back)
                .ok_or_else(invalid)?
                .and_time(NaiveTime::MIN)
        }
        'd' => date.and_time(NaiveTime::MIN),
        'h' | 'H' => date.and_hms_opt(time.hour(), 0, 0).ok_or_else(invalid)?,
        'm' => date.and_hms_opt(time.hour(), time.minute(), 0).ok_or_else(invalid)?,
        's' => date
            .and_hms_opt(time.hour(), time.minute(), time.second())
            .ok_or_else(invalid)?,
        _ => return Err(RangeError::parse(text, format!("unknown date math unit [{}]", unit))),
    };
    localize(text, *dt.offset(), naive)
}
