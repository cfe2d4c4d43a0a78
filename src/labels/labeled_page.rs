//! Page output with caller-chosen keys

use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// An ordered, dynamically keyed page.
///
/// Its shape depends on the labels it was built with, so it is a JSON object
/// rather than a fixed struct. Indexing a missing key yields `Value::Null`,
/// like indexing a `serde_json::Value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabeledPage(Map<String, Value>);

impl LabeledPage {
    /// Wraps an already-labelled map
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the value under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates the top-level keys in output order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Converts into a JSON object value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl Index<&str> for LabeledPage {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

impl From<LabeledPage> for Value {
    fn from(page: LabeledPage) -> Self {
        page.into_value()
    }
}
