//! In-memory relation predicates
//!
//! [`InMemoryQueryFactory`] evaluates relations directly against [`Range`]
//! values instead of producing queries for an external index.

use rangefield_types::{Range, RangeDomain, RangeRelation, RangeValue};
use serde::Serialize;

use crate::query::RelationQueryFactory;

/// A relation between closed query bounds and indexed ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangePredicate {
    pub domain: RangeDomain,
    pub relation: RangeRelation,
    pub lower: RangeValue,
    pub upper: RangeValue,
}

impl RangePredicate {
    /// Whether `range` satisfies the relation. Ranges from another domain never match.
    pub fn matches(&self, range: &Range) -> bool {
        if range.domain() != self.domain {
            return false;
        }
        let (rl, rh) = range.closed_bounds();
        let (ql, qh) = (self.lower, self.upper);
        match self.relation {
            RangeRelation::Intersects => rl <= qh && rh >= ql,
            RangeRelation::Within => rl >= ql && rh <= qh,
            RangeRelation::Contains => rl <= ql && rh >= qh,
            RangeRelation::Disjoint => false,
        }
    }

    /// Keep the ranges that match
    pub fn filter<'r>(&self, ranges: impl IntoIterator<Item = &'r Range>) -> Vec<&'r Range> {
        ranges.into_iter().filter(|range| self.matches(range)).collect()
    }
}

/// Factory producing [`RangePredicate`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryQueryFactory;

impl InMemoryQueryFactory {
    fn predicate(domain: RangeDomain, relation: RangeRelation, lower: RangeValue, upper: RangeValue) -> RangePredicate {
        RangePredicate {
            domain,
            relation,
            lower,
            upper,
        }
    }
}

impl RelationQueryFactory for InMemoryQueryFactory {
    type Query = RangePredicate;

    fn intersects(&self, domain: RangeDomain, lower: RangeValue, upper: RangeValue) -> RangePredicate {
        Self::predicate(domain, RangeRelation::Intersects, lower, upper)
    }

    fn within(&self, domain: RangeDomain, lower: RangeValue, upper: RangeValue) -> RangePredicate {
        Self::predicate(domain, RangeRelation::Within, lower, upper)
    }

    fn contains(&self, domain: RangeDomain, lower: RangeValue, upper: RangeValue) -> RangePredicate {
        Self::predicate(domain, RangeRelation::Contains, lower, upper)
    }
}
