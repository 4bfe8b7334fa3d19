//! Records
//!
//! A record is a map from field name to JSON value. The `_id` key is
//! reserved for the server-assigned identifier.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallcrud_core::{CrudError, CrudResult};

/// Reserved identifier field
pub const ID_FIELD: &str = "_id";

/// One record of a schema
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Get a value by field name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Set a value, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Builder form of `insert`
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Remove a value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Check if a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Identifier, if present and non-empty
    pub fn id(&self) -> Option<&Value> {
        match self.0.get(ID_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value),
        }
    }

    /// Check if the record carries an identifier
    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Copy of this record without `_id`
    pub fn without_id(&self) -> Self {
        let mut copy = self.clone();
        copy.remove(ID_FIELD);
        copy
    }

    /// Copy every key of `other` over this record
    pub fn overlay(&mut self, other: &Record) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert to a JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = CrudError;

    fn try_from(value: Value) -> CrudResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CrudError::malformed(
                "record",
                format!("expected an object, got {}", other),
            )),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_presence() {
        assert!(!Record::new().has_id());
        assert!(!Record::new().with(ID_FIELD, json!("")).has_id());
        assert!(!Record::new().with(ID_FIELD, Value::Null).has_id());
        let record = Record::new().with(ID_FIELD, json!("abc"));
        assert_eq!(record.id(), Some(&json!("abc")));
    }

    #[test]
    fn test_without_id_leaves_original() {
        let record = Record::new()
            .with(ID_FIELD, json!("abc"))
            .with("name", json!("Ann"));
        let stripped = record.without_id();
        assert!(!stripped.contains(ID_FIELD));
        assert!(record.contains(ID_FIELD));
        assert_eq!(stripped.get("name"), Some(&json!("Ann")));
    }

    #[test]
    fn test_overlay_replaces_values() {
        let mut base = Record::new().with("a", json!(1)).with("b", json!(2));
        base.overlay(&Record::new().with("b", json!(3)).with("c", json!(4)));
        assert_eq!(base.into_value(), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_try_from_rejects_non_object() {
        assert!(Record::try_from(json!([1, 2])).is_err());
        assert_eq!(Record::try_from(json!({"x": 1})).unwrap().len(), 1);
    }
}
