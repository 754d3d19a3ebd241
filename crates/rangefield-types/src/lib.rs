//! Range domains, values and ranges
//!
//! This crate defines the data model of the range engine:
//! - [`RangeDomain`] and its static [`DomainTable`] strategies
//! - [`RangeValue`] endpoint values and raw [`RangeToken`]s
//! - Token coercion ([`CoerceContext`], [`Coercion`], [`InstantResolver`])
//! - The immutable [`Range`] and the [`RangeRelation`] set

pub mod coercion;
pub mod domain;
pub mod range;
pub mod relation;
pub mod token;
pub mod value;

pub use coercion::{CoerceContext, Coercion, EpochMillisResolver, InstantResolver};
pub use domain::{CoerceFn, DomainTable, RangeDomain, StepFn};
pub use range::Range;
pub use relation::RangeRelation;
pub use token::RangeToken;
pub use value::RangeValue;
