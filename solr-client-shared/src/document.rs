//! Solr document type.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::field_value::FieldValue;

static MISSING: FieldValue = FieldValue::Missing;

/// One search result or update record: an ordered bag of named fields.
///
/// Field names are unique and keep the order in which the engine emitted
/// them. Looking up an absent field yields [`FieldValue::Missing`], so
/// accessor chains never need to branch on presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field, or [`FieldValue::Missing`] if the document does not have it.
    pub fn get(&self, name: &str) -> &FieldValue {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
            .unwrap_or(&MISSING)
    }

    /// Set a field, replacing any existing value but keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Append a value to a field, creating it if needed.
    ///
    /// A field emitted several times collapses into one multi-valued field.
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => existing.push(value),
            None => self.fields.push((name, FieldValue::Single(value.into()))),
        }
    }

    /// Builder-style [`Document::insert`].
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    /// Field names in emission order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
