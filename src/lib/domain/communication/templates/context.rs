//! Substitution context

use serde::Serialize;
use serde_json::{Map, Value};

/// Flat mapping of named values visible to the substitution engine
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubstitutionContext(Map<String, Value>);

impl SubstitutionContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns a copy of this context extended with the rendered `styles` and `body`
    pub fn with_rendered(&self, styles: &str, body: &str) -> Self {
        let mut extended = self.clone();

        extended.insert("styles", styles);
        extended.insert("body", body);

        extended
    }
}
