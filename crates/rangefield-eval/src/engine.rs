//! Range engine - the entry point for normalizing values and building queries

use rangefield_diagnostics::Result;
use rangefield_types::{InstantResolver, Range, RangeDomain, RangeRelation, RangeToken, RangeValue};
use std::fmt;
use std::sync::Arc;

use crate::bound::RangeBoundParser;
use crate::context::{ParseOptions, QueryContext};
use crate::instant::DateMathResolver;
use crate::query::{QueryBounds, RelationQueryBuilder, RelationQueryFactory};

/// Range engine
///
/// Holds the instant resolver used for timestamp text and the default parse
/// options. The engine is immutable and can be shared across threads.
#[derive(Clone)]
pub struct RangeEngine {
    resolver: Arc<dyn InstantResolver>,
    options: ParseOptions,
}

impl Default for RangeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RangeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeEngine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RangeEngine {
    /// Create an engine using [`DateMathResolver`]
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(DateMathResolver::new()))
    }

    /// Create an engine with a custom instant resolver
    pub fn with_resolver(resolver: Arc<dyn InstantResolver>) -> Self {
        Self {
            resolver,
            options: ParseOptions::default(),
        }
    }

    /// Set the default parse options used by [`RangeEngine::normalize`]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn resolver(&self) -> &dyn InstantResolver {
        self.resolver.as_ref()
    }

    /// Endpoint parser for `domain`
    pub fn bound_parser(&self, domain: RangeDomain, options: ParseOptions) -> RangeBoundParser<'_> {
        RangeBoundParser::new(domain, self.resolver.as_ref(), options)
    }

    /// Build a range, keeping the inclusive flags on it
    pub fn normalize(
        &self,
        domain: RangeDomain,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
    ) -> Result<Range> {
        let range = self
            .bound_parser(domain, self.options)
            .normalize(from, to, include_from, include_to)?;
        log::debug!("normalized [{}] range to {}", domain, range);
        Ok(range)
    }

    /// Parse one field-value endpoint
    pub fn parse_endpoint(
        &self,
        domain: RangeDomain,
        token: Option<&RangeToken>,
        is_lower_bound: bool,
        inclusive: bool,
        options: ParseOptions,
    ) -> Result<RangeValue> {
        self.bound_parser(domain, options)
            .parse_endpoint(token, is_lower_bound, inclusive)
    }

    /// Parse a field value into a range with inclusive stored bounds
    pub fn parse_range(
        &self,
        domain: RangeDomain,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
        options: ParseOptions,
    ) -> Result<Range> {
        let range = self
            .bound_parser(domain, options)
            .parse_range(from, to, include_from, include_to)?;
        log::debug!("parsed [{}] field value {}", domain, range);
        Ok(range)
    }

    /// Query builder for one domain and relation
    pub fn query_builder<'a>(
        &'a self,
        domain: RangeDomain,
        relation: RangeRelation,
        query: &QueryContext,
    ) -> Result<RelationQueryBuilder<'a>> {
        RelationQueryBuilder::new(domain, relation, self.resolver.as_ref(), query)
    }

    /// Resolve raw query bounds into closed bounds for `relation`
    #[allow(clippy::too_many_arguments)]
    pub fn build_query(
        &self,
        domain: RangeDomain,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
        relation: RangeRelation,
        query: &QueryContext,
    ) -> Result<QueryBounds> {
        self.query_builder(domain, relation, query)?
            .build(from, to, include_from, include_to)
    }

    /// Resolve raw query bounds and build the query with `factory`
    #[allow(clippy::too_many_arguments)]
    pub fn build_query_with<F: RelationQueryFactory>(
        &self,
        factory: &F,
        domain: RangeDomain,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
        relation: RangeRelation,
        query: &QueryContext,
    ) -> Result<F::Query> {
        self.query_builder(domain, relation, query)?
            .build_with(factory, from, to, include_from, include_to)
    }

    /// Exact-value lookup: ranges intersecting the point `[v : v]`
    pub fn build_term_query(
        &self,
        domain: RangeDomain,
        token: &RangeToken,
        query: &QueryContext,
    ) -> Result<QueryBounds> {
        self.build_query(
            domain,
            Some(token),
            Some(token),
            true,
            true,
            RangeRelation::Intersects,
            query,
        )
    }
}
