//! Raw endpoint tokens as they arrive from documents and queries

use rangefield_diagnostics::{RangeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unparsed endpoint token.
///
/// Tokens are untyped: the domain decides how to read them during coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeToken {
    /// Whole number
    Int(i64),
    /// Number with a fractional part or outside the i64 range
    Float(f64),
    /// Boolean (never valid for any domain, kept to report it precisely)
    Bool(bool),
    /// Text: numbers, addresses and date expressions
    Text(String),
}

impl RangeToken {
    /// Create a text token
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Convert a JSON value into an optional token; `null` means "no token".
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Self>> {
        use serde_json::Value;
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Self::Bool(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Some(Self::Int(i))),
                None => n
                    .as_f64()
                    .map(|f| Some(Self::Float(f)))
                    .ok_or_else(|| RangeError::invalid_value("token", n, "number out of range")),
            },
            Value::String(s) => Ok(Some(Self::Text(s.clone()))),
            Value::Array(_) | Value::Object(_) => Err(RangeError::invalid_value(
                "token",
                value,
                "expected a string or a number",
            )),
        }
    }
}

impl From<i64> for RangeToken {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RangeToken {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for RangeToken {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RangeToken {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RangeToken {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}
