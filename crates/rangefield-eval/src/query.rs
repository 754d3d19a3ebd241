//! Relation query construction
//!
//! Query bounds are always coerced strictly: a fractional bound for an
//! integer domain is an error, never truncated. Exclusive bounds are stepped
//! inward before the relation constructor sees them, so every constructor
//! receives closed bounds.

use rangefield_diagnostics::{RangeError, Result};
use rangefield_types::{CoerceContext, InstantResolver, RangeDomain, RangeRelation, RangeToken, RangeValue};
use serde::Serialize;

use crate::bound::step_inward;
use crate::context::QueryContext;

/// Builds the query representation of one relation over closed bounds.
///
/// Implemented by the downstream index engine.
pub trait RelationQueryFactory {
    type Query;

    fn intersects(&self, domain: RangeDomain, lower: RangeValue, upper: RangeValue) -> Self::Query;

    fn within(&self, domain: RangeDomain, lower: RangeValue, upper: RangeValue) -> Self::Query;

    fn contains(&self, domain: RangeDomain, lower: RangeValue, upper: RangeValue) -> Self::Query;
}

/// Closed query bounds together with the relation to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryBounds {
    pub domain: RangeDomain,
    pub lower: RangeValue,
    pub upper: RangeValue,
    pub relation: RangeRelation,
}

impl QueryBounds {
    /// The `(lower, upper)` pair
    pub fn into_pair(self) -> (RangeValue, RangeValue) {
        (self.lower, self.upper)
    }

    /// Hand the bounds to the constructor for this relation
    pub fn apply<F: RelationQueryFactory>(&self, factory: &F) -> Result<F::Query> {
        match self.relation {
            RangeRelation::Intersects => Ok(factory.intersects(self.domain, self.lower, self.upper)),
            RangeRelation::Within => Ok(factory.within(self.domain, self.lower, self.upper)),
            RangeRelation::Contains => Ok(factory.contains(self.domain, self.lower, self.upper)),
            RangeRelation::Disjoint => Err(RangeError::unsupported_relation(
                self.relation.name(),
                self.domain.name(),
            )),
        }
    }
}

/// Builds relation queries for one domain and relation.
#[derive(Debug, Clone, Copy)]
pub struct RelationQueryBuilder<'a> {
    domain: RangeDomain,
    relation: RangeRelation,
    ctx: CoerceContext<'a>,
}

impl<'a> RelationQueryBuilder<'a> {
    /// Fails when the domain cannot evaluate `relation`
    pub fn new(
        domain: RangeDomain,
        relation: RangeRelation,
        resolver: &'a dyn InstantResolver,
        query: &QueryContext,
    ) -> Result<Self> {
        if !domain.supports(relation) {
            return Err(RangeError::unsupported_relation(relation.name(), domain.name()));
        }
        let ctx = CoerceContext::new(resolver)
            .allow_coerce(false)
            .with_now(query.now)
            .with_zone(query.zone);
        Ok(Self {
            domain,
            relation,
            ctx,
        })
    }

    /// Resolve raw query bounds into closed bounds
    pub fn build(
        &self,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
    ) -> Result<QueryBounds> {
        let lower = self.bound(from, true, include_from)?;
        let upper = self.bound(to, false, include_to)?;
        if lower > upper {
            return Err(RangeError::range_order(lower, upper));
        }

        log::debug!(
            "{} query on [{}]: [{} : {}]",
            self.relation,
            self.domain,
            lower,
            upper
        );
        Ok(QueryBounds {
            domain: self.domain,
            lower,
            upper,
            relation: self.relation,
        })
    }

    /// Resolve the bounds and build the query with `factory`
    pub fn build_with<F: RelationQueryFactory>(
        &self,
        factory: &F,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
    ) -> Result<F::Query> {
        self.build(from, to, include_from, include_to)?.apply(factory)
    }

    fn bound(&self, token: Option<&RangeToken>, is_lower_bound: bool, inclusive: bool) -> Result<RangeValue> {
        let Some(token) = token else {
            return Ok(if is_lower_bound {
                self.domain.min_value()
            } else {
                self.domain.max_value()
            });
        };
        let value = self.domain.coerce(token, &self.ctx)?.value;
        log::trace!("query bound [{}] resolved to {}", token, value);
        if inclusive {
            Ok(value)
        } else {
            step_inward(self.domain, value, is_lower_bound)
        }
    }
}
