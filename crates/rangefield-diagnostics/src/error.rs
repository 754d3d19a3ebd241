//! Range error types

use crate::{
    ErrorCode, RNG0001, RNG0002, RNG0003, RNG0004, RNG0100, RNG0101, RNG0200, RNG0201, RNG0300,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the value or query is rejected
    Error,
    /// Warning - the value was accepted but altered
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A user-facing diagnostic message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(help) = &self.help {
            write!(f, " ({})", help)?;
        }
        Ok(())
    }
}

/// Errors produced while coercing, normalizing or querying ranges.
///
/// Every failure is local and synchronous. Domains are carried by their
/// external type tag (`"int_range"`, `"ip_range"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Token is not representable in the domain
    #[error("invalid value [{value}] for [{domain}]: {reason}")]
    InvalidValue {
        domain: String,
        value: String,
        reason: String,
    },

    /// Coercion dropped a fractional part
    #[error("value [{value}] for [{domain}] has a decimal part")]
    PrecisionLoss { domain: String, value: String },

    /// Date expression could not be resolved
    #[error("failed to parse date expression [{expression}]: {message}")]
    Parse { expression: String, message: String },

    /// A `now`-relative expression where no reference time may be used
    #[error("[now] is not allowed in [{expression}]: {reason}")]
    NowNotAllowed { expression: String, reason: String },

    /// Lower bound above upper bound after normalization
    #[error("lower bound [{from}] is greater than upper bound [{to}]")]
    RangeOrder { from: String, to: String },

    /// The bounds describe a range without values
    #[error("range {range} contains no values")]
    EmptyRange { range: String },

    /// Relation that the domain cannot evaluate
    #[error("relation [{relation}] is not supported for [{domain}]")]
    UnsupportedRelation { relation: String, domain: String },

    /// Query against a field that is not indexed
    #[error("cannot search on field [{field}] since it is not indexed")]
    NotIndexed { field: String },

    /// Invalid field configuration or field input
    #[error("field [{field}]: {message}")]
    Mapping { field: String, message: String },
}

impl RangeError {
    /// Create an invalid value error
    pub fn invalid_value(
        domain: impl Into<String>,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            domain: domain.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a precision loss error
    pub fn precision_loss(domain: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::PrecisionLoss {
            domain: domain.into(),
            value: value.to_string(),
        }
    }

    /// Create a date expression parse error
    pub fn parse(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Create a now-not-allowed error
    pub fn now_not_allowed(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NowNotAllowed {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create a bound ordering error
    pub fn range_order(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self::RangeOrder {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an empty range error
    pub fn empty_range(range: impl Into<String>) -> Self {
        Self::EmptyRange {
            range: range.into(),
        }
    }

    /// Create an unsupported relation error
    pub fn unsupported_relation(relation: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::UnsupportedRelation {
            relation: relation.into(),
            domain: domain.into(),
        }
    }

    /// Create a not-indexed error
    pub fn not_indexed(field: impl Into<String>) -> Self {
        Self::NotIndexed {
            field: field.into(),
        }
    }

    /// Create a mapping error
    pub fn mapping(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidValue { .. } => RNG0001,
            Self::PrecisionLoss { .. } => RNG0002,
            Self::Parse { .. } => RNG0003,
            Self::NowNotAllowed { .. } => RNG0004,
            Self::RangeOrder { .. } => RNG0100,
            Self::EmptyRange { .. } => RNG0101,
            Self::UnsupportedRelation { .. } => RNG0200,
            Self::NotIndexed { .. } => RNG0201,
            Self::Mapping { .. } => RNG0300,
        }
    }

    /// Precision loss is the only failure a caller may choose to downgrade
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::PrecisionLoss { .. })
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let diag = if self.is_soft() {
            Diagnostic::warning(code, self.to_string())
        } else {
            Diagnostic::error(code, self.to_string())
        };
        match code.info().help {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }
}
