//! Range normalization and relation query engine
//!
//! This crate turns raw endpoint tokens into ranges and query bounds:
//!
//! - **Normalization**: [`RangeEngine::normalize`] coerces both endpoints and
//!   keeps the inclusive flags on the resulting [`Range`]
//! - **Field values**: [`RangeEngine::parse_range`] applies exclusivity
//!   eagerly; `now` is never allowed
//! - **Queries**: [`RangeEngine::build_query`] coerces strictly, steps
//!   exclusive bounds inward and hands closed bounds to a
//!   [`RelationQueryFactory`]
//! - **Dates**: [`DateMathResolver`] resolves literals and date math
//!
//! # Example
//!
//! ```
//! use rangefield_eval::{InMemoryQueryFactory, QueryContext, RangeEngine};
//! use rangefield_types::{RangeDomain, RangeRelation, RangeToken};
//!
//! let engine = RangeEngine::new();
//! let indexed = engine
//!     .normalize(RangeDomain::Int64, Some(&RangeToken::Int(6)), Some(&RangeToken::Int(12)), true, true)
//!     .unwrap();
//! let predicate = engine
//!     .build_query_with(
//!         &InMemoryQueryFactory,
//!         RangeDomain::Int64,
//!         Some(&RangeToken::Int(5)),
//!         Some(&RangeToken::Int(15)),
//!         true,
//!         false,
//!         RangeRelation::Within,
//!         &QueryContext::new(),
//!     )
//!     .unwrap();
//! assert!(predicate.matches(&indexed));
//! ```
//!
//! [`Range`]: rangefield_types::Range

pub mod bound;
pub mod context;
pub mod engine;
pub mod instant;
pub mod predicate;
pub mod query;

pub use bound::{Endpoint, RangeBoundParser};
pub use context::{ParseOptions, PrecisionLossPolicy, QueryContext};
pub use engine::RangeEngine;
pub use instant::DateMathResolver;
pub use predicate::{InMemoryQueryFactory, RangePredicate};
pub use query::{QueryBounds, RelationQueryBuilder, RelationQueryFactory};
