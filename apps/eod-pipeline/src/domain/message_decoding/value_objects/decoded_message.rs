//! Decoded tag/value message.

use std::collections::HashMap;

use super::FieldKey;

/// Ordered field mapping decoded from one wire message.
///
/// Keeps an explicit key list for insertion order next to the value map.
/// Re-inserting an existing key replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMessage {
    keys: Vec<FieldKey>,
    values: HashMap<FieldKey, String>,
}

impl DecodedMessage {
    /// Create an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: FieldKey, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.values.get_mut(&key) {
            *existing = value;
        } else {
            self.keys.push(key.clone());
            self.values.insert(key, value);
        }
    }

    /// Insert a field only if it is not already present.
    pub fn insert_default(&mut self, key: FieldKey, value: impl Into<String>) {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
            self.values.insert(key, value.into());
        }
    }

    /// Value of a field.
    #[must_use]
    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether the field is present.
    #[must_use]
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.keys.iter()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the message has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
