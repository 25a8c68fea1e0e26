use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single comparable observation, either a count or a categorical state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Category(String),
}

impl FieldValue {
    pub fn count(value: i64) -> Self {
        Self::Number(value as f64)
    }

    pub fn category(value: impl Into<String>) -> Self {
        Self::Category(value.into())
    }

    /// Integer view of a numeric value, dropping any fractional noise
    pub fn truncated(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(n.trunc() as i64),
            Self::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(c) => Some(c),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Category(c) => write!(f, "{}", c),
        }
    }
}

/// Flat field name -> value mapping shared by the parsed breakdown and the
/// combined submissions of one alliance
pub type FieldMap = BTreeMap<String, FieldValue>;
