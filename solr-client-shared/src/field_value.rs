//! Schema-less document field values.
//!
//! Solr documents carry no static schema on the wire: a field may be absent
//! for one document, single-valued for another and multi-valued for a third.
//! `FieldValue` keeps the raw text and only offers conversions that fall back
//! to a caller-supplied default instead of failing.

use serde::Serialize;
use std::fmt;

/// The raw wire value of a single document field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The field was not present on the document.
    #[default]
    Missing,
    /// A single token, kept exactly as the engine sent it.
    Single(String),
    /// Repeated values, in wire order.
    Multi(Vec<String>),
}

impl FieldValue {
    /// Create a single-valued field.
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// Create a multi-valued field from values in wire order.
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Whether the field was absent on the document.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Whether the field carries more than one value slot.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Append another value, turning a single value into a multi-valued one.
    ///
    /// Used while decoding documents where the same field name is emitted
    /// more than once.
    pub fn push(&mut self, value: impl Into<String>) {
        let value = value.into();
        *self = match std::mem::take(self) {
            Self::Missing => Self::Single(value),
            Self::Single(first) => Self::Multi(vec![first, value]),
            Self::Multi(mut values) => {
                values.push(value);
                Self::Multi(values)
            }
        };
    }

    fn scalar(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.trim()),
            _ => None,
        }
    }

    /// Parse the value as an integer.
    ///
    /// Returns `default` when the field is missing, multi-valued or not an
    /// integer.
    pub fn as_optional_int(&self, default: Option<i64>) -> Option<i64> {
        self.scalar()
            .and_then(|s| s.parse::<i64>().ok())
            .or(default)
    }

    /// Parse the value as a double, with the same fallback policy as
    /// [`FieldValue::as_optional_int`].
    pub fn as_optional_double(&self, default: Option<f64>) -> Option<f64> {
        self.scalar()
            .and_then(|s| s.parse::<f64>().ok())
            .or(default)
    }

    /// Parse a Solr `bool` value. Only `true` and `false` are accepted.
    pub fn as_optional_bool(&self, default: Option<bool>) -> Option<bool> {
        match self.scalar() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => default,
        }
    }

    /// The values as a list.
    ///
    /// A single value becomes a one-element list; a missing field yields
    /// `default`.
    pub fn as_list(&self, default: Option<Vec<String>>) -> Option<Vec<String>> {
        match self {
            Self::Missing => default,
            Self::Single(value) => Some(vec![value.clone()]),
            Self::Multi(values) => Some(values.clone()),
        }
    }

    /// The raw textual form of the value.
    ///
    /// Missing fields render as an empty string and multi-valued fields as
    /// their values joined by `", "`.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Single(value) => f.write_str(value),
            Self::Multi(values) => f.write_str(&values.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}
