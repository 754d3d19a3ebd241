//! Endpoint parsing for field values
//!
//! Field values never see a reference time, so a timestamp endpoint written
//! as a `now` expression is rejected here.

use rangefield_diagnostics::{RangeError, Result};
use rangefield_types::{CoerceContext, InstantResolver, Range, RangeDomain, RangeToken, RangeValue};

use crate::context::{ParseOptions, PrecisionLossPolicy};

/// A parsed endpoint before it is collapsed into a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// No bound was given
    Unbounded,
    /// A coerced bound
    Bounded(RangeValue),
}

impl Endpoint {
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded(_))
    }

    pub fn value(&self) -> Option<RangeValue> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(value) => Some(*value),
        }
    }

    /// The bound value, or the domain sentinel for the given side
    pub fn or_sentinel(&self, domain: RangeDomain, is_lower_bound: bool) -> RangeValue {
        match self {
            Self::Bounded(value) => *value,
            Self::Unbounded if is_lower_bound => domain.min_value(),
            Self::Unbounded => domain.max_value(),
        }
    }
}

/// Turns endpoint tokens into domain values for one domain.
#[derive(Debug, Clone, Copy)]
pub struct RangeBoundParser<'a> {
    domain: RangeDomain,
    ctx: CoerceContext<'a>,
    options: ParseOptions,
}

impl<'a> RangeBoundParser<'a> {
    pub fn new(domain: RangeDomain, resolver: &'a dyn InstantResolver, options: ParseOptions) -> Self {
        Self {
            domain,
            ctx: CoerceContext::new(resolver).allow_coerce(options.coerce),
            options,
        }
    }

    pub fn domain(&self) -> RangeDomain {
        self.domain
    }

    /// Coerce an optional token into an [`Endpoint`]
    pub fn endpoint(&self, token: Option<&RangeToken>) -> Result<Endpoint> {
        match token {
            None => Ok(Endpoint::Unbounded),
            Some(token) => self.coerce(token).map(Endpoint::Bounded),
        }
    }

    /// Parse one endpoint into the value it contributes to a closed range.
    ///
    /// An exclusive bound is stepped inward; an absent bound is the domain
    /// sentinel and its flag is ignored.
    pub fn parse_endpoint(
        &self,
        token: Option<&RangeToken>,
        is_lower_bound: bool,
        inclusive: bool,
    ) -> Result<RangeValue> {
        let endpoint = self.endpoint(token)?;
        self.close(endpoint, is_lower_bound, inclusive)
    }

    /// Parse both endpoints eagerly into a range whose stored bounds are inclusive
    pub fn parse_range(
        &self,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
    ) -> Result<Range> {
        let from = self.endpoint(from)?;
        let to = self.endpoint(to)?;

        if let (Endpoint::Bounded(lo), Endpoint::Bounded(hi)) = (from, to) {
            if lo == hi && !(include_from && include_to) {
                return Err(RangeError::empty_range(format!(
                    "{}{} : {}{}",
                    if include_from { '[' } else { '(' },
                    lo,
                    hi,
                    if include_to { ']' } else { ')' },
                )));
            }
        }

        let lower = self.close(from, true, include_from)?;
        let upper = self.close(to, false, include_to)?;
        Range::closed(self.domain, lower, upper)
    }

    /// Coerce both endpoints but keep the flags on the range
    pub fn normalize(
        &self,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
    ) -> Result<Range> {
        let from = self.endpoint(from)?;
        let to = self.endpoint(to)?;
        Range::new(self.domain, from.value(), to.value(), include_from, include_to)
    }

    fn close(&self, endpoint: Endpoint, is_lower_bound: bool, inclusive: bool) -> Result<RangeValue> {
        let value = endpoint.or_sentinel(self.domain, is_lower_bound);
        if inclusive || !endpoint.is_bounded() {
            return Ok(value);
        }
        step_inward(self.domain, value, is_lower_bound)
    }

    fn coerce(&self, token: &RangeToken) -> Result<RangeValue> {
        if let (RangeDomain::Timestamp, RangeToken::Text(text)) = (self.domain, token) {
            if text.trim_start().starts_with("now") {
                return Err(RangeError::now_not_allowed(
                    text.as_str(),
                    "field values cannot be relative to the current time",
                ));
            }
        }
        let coercion = self.domain.coerce(token, &self.ctx)?;
        if coercion.truncated {
            match self.options.precision_loss {
                PrecisionLossPolicy::Reject => {
                    return Err(RangeError::precision_loss(self.domain.name(), token));
                }
                PrecisionLossPolicy::Warn => {
                    log::warn!(
                        "truncated [{}] to {} for [{}]",
                        token,
                        coercion.value,
                        self.domain
                    );
                }
            }
        }
        log::trace!("coerced [{}] to {} for [{}]", token, coercion.value, self.domain);
        Ok(coercion.value)
    }
}

/// Successor of an exclusive lower bound, predecessor of an exclusive upper
/// bound. A bound already at the domain edge leaves nothing to include.
pub(crate) fn step_inward(domain: RangeDomain, value: RangeValue, is_lower_bound: bool) -> Result<RangeValue> {
    if is_lower_bound {
        domain.checked_successor(&value).ok_or_else(|| {
            RangeError::empty_range(format!("({} : {}]", value, domain.max_value()))
        })
    } else {
        domain.checked_predecessor(&value).ok_or_else(|| {
            RangeError::empty_range(format!("[{} : {})", domain.min_value(), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangefield_types::EpochMillisResolver;

    #[test]
    fn test_endpoint_sentinels() {
        assert_eq!(
            Endpoint::Unbounded.or_sentinel(RangeDomain::Int32, true),
            RangeValue::Int(i32::MIN)
        );
        assert_eq!(
            Endpoint::Unbounded.or_sentinel(RangeDomain::Int32, false),
            RangeValue::Int(i32::MAX)
        );
        assert_eq!(
            Endpoint::Bounded(RangeValue::Int(3)).or_sentinel(RangeDomain::Int32, false),
            RangeValue::Int(3)
        );
    }

    #[test]
    fn test_step_inward_at_edge() {
        let err = step_inward(RangeDomain::Int32, RangeValue::Int(i32::MAX), true).unwrap_err();
        assert!(matches!(err, RangeError::EmptyRange { .. }));
        assert_eq!(
            step_inward(RangeDomain::Int32, RangeValue::Int(0), false).unwrap(),
            RangeValue::Int(-1)
        );
    }

    #[test]
    fn test_reject_policy() {
        let resolver = EpochMillisResolver;
        let options = ParseOptions::default().with_precision_loss(PrecisionLossPolicy::Reject);
        let parser = RangeBoundParser::new(RangeDomain::Int64, &resolver, options);
        let err = parser.endpoint(Some(&RangeToken::Float(2.5))).unwrap_err();
        assert!(err.is_soft());
    }
}
