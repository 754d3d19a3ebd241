//! Range error codes following a structured numbering system
//!
//! Error code ranges:
//! - RNG0001-RNG0099: Value errors (coercion, date resolution)
//! - RNG0100-RNG0199: Range errors (bound ordering, emptiness)
//! - RNG0200-RNG0299: Query errors (relations, field capabilities)
//! - RNG0300-RNG0399: Mapping errors (field configuration, input shape)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a value error (0001-0099)
    pub const fn is_value_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a range error (0100-0199)
    pub const fn is_range_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a query error (0200-0299)
    pub const fn is_query_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a mapping error (0300-0399)
    pub const fn is_mapping_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RNG{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Value errors (0001-0099)
    map.insert(1, ErrorInfo::new("Value not representable in range domain"));
    map.insert(
        2,
        ErrorInfo::new("Coercion truncated a fractional value")
            .with_help("Disable coercion to reject fractional values, or send whole numbers"),
    );
    map.insert(3, ErrorInfo::new("Invalid date expression"));
    map.insert(
        4,
        ErrorInfo::new("'now' is not allowed here")
            .with_help("Indexed values must be deterministic; use an absolute date"),
    );

    // Range errors (0100-0199)
    map.insert(100, ErrorInfo::new("Lower bound exceeds upper bound"));
    map.insert(
        101,
        ErrorInfo::new("Range contains no values")
            .with_help("Equal bounds are only valid when both are inclusive"),
    );

    // Query errors (0200-0299)
    map.insert(200, ErrorInfo::new("Unsupported relation"));
    map.insert(201, ErrorInfo::new("Field is not indexed"));

    // Mapping errors (0300-0399)
    map.insert(300, ErrorInfo::new("Invalid range field mapping"));

    map
});

// Value errors
pub const RNG0001: ErrorCode = ErrorCode::new(1);
pub const RNG0002: ErrorCode = ErrorCode::new(2);
pub const RNG0003: ErrorCode = ErrorCode::new(3);
pub const RNG0004: ErrorCode = ErrorCode::new(4);

// Range errors
pub const RNG0100: ErrorCode = ErrorCode::new(100);
pub const RNG0101: ErrorCode = ErrorCode::new(101);

// Query errors
pub const RNG0200: ErrorCode = ErrorCode::new(200);
pub const RNG0201: ErrorCode = ErrorCode::new(201);

// Mapping errors
pub const RNG0300: ErrorCode = ErrorCode::new(300);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(RNG0001.to_string(), "RNG0001");
        assert_eq!(RNG0101.to_string(), "RNG0101");
    }

    #[test]
    fn test_error_categories() {
        assert!(RNG0001.is_value_error());
        assert!(!RNG0001.is_range_error());

        assert!(RNG0100.is_range_error());
        assert!(RNG0200.is_query_error());
        assert!(RNG0300.is_mapping_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(RNG0100.info().description, "Lower bound exceeds upper bound");
        assert!(RNG0004.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
