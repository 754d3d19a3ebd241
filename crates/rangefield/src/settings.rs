//! Index-wide settings

use serde::{Deserialize, Serialize};

/// Settings shared by every field of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Default for fields that do not set `coerce`
    #[serde(rename = "index.mapping.coerce", default = "default_coerce")]
    pub coerce: bool,
}

fn default_coerce() -> bool {
    true
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            coerce: default_coerce(),
        }
    }
}

/// A setting value and whether it was set explicitly or inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Explicit<T> {
    value: T,
    explicit: bool,
}

impl<T: Copy> Explicit<T> {
    pub fn new(value: T, explicit: bool) -> Self {
        Self { value, explicit }
    }

    /// An inherited default
    pub fn implicit(value: T) -> Self {
        Self::new(value, false)
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn explicit(&self) -> bool {
        self.explicit
    }

    /// `explicit` if present, otherwise the inherited `fallback`
    pub fn or_inherit(explicit: Option<T>, fallback: T) -> Self {
        match explicit {
            Some(value) => Self::new(value, true),
            None => Self::implicit(fallback),
        }
    }
}
