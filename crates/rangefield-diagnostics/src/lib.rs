//! Range field diagnostics and error handling
//!
//! This crate provides the error handling infrastructure for the range engine,
//! including structured error codes, the [`RangeError`] taxonomy, and
//! diagnostic reporting.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for range operations
pub type Result<T> = std::result::Result<T, RangeError>;
