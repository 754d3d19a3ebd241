//! Parse and query contexts

use chrono::{FixedOffset, Offset, Utc};

/// What to do when coercion drops a fractional part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrecisionLossPolicy {
    /// Fail with a precision loss error
    Reject,
    /// Keep the truncated value and log a warning
    #[default]
    Warn,
}

/// Options for parsing field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Allow fractional values to be truncated in integer domains
    pub coerce: bool,
    /// How accepted truncation is reported
    pub precision_loss: PrecisionLossPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            coerce: true,
            precision_loss: PrecisionLossPolicy::Warn,
        }
    }
}

impl ParseOptions {
    /// Options that reject any fractional value
    pub fn strict() -> Self {
        Self {
            coerce: false,
            precision_loss: PrecisionLossPolicy::Reject,
        }
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    pub fn with_precision_loss(mut self, policy: PrecisionLossPolicy) -> Self {
        self.precision_loss = policy;
        self
    }
}

/// Per-query context for resolving date expressions.
///
/// There is no global clock: a `now` expression only resolves when the
/// caller supplies a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    /// Reference time in epoch milliseconds
    pub now: Option<i64>,
    /// Zone for date literals without an explicit offset
    pub zone: FixedOffset,
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryContext {
    /// No reference time, UTC
    pub fn new() -> Self {
        Self {
            now: None,
            zone: Utc.fix(),
        }
    }

    /// Set the reference time
    pub fn with_now(mut self, now: i64) -> Self {
        self.now = Some(now);
        self
    }

    /// Set the default zone
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }
}
