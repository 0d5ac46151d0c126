//! Key/value metadata attached to records and capture reports
//!
//! This module provides:
//! - `Meta`: insertion-ordered key/value mapping, serialized as a JSON object
//! - `merge_tags`: shallow merge of two optional mappings, right side wins

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Arbitrary key/value mapping passed through verbatim into log records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta {
    fields: Map<String, Value>,
}

impl Meta {
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field (builder pattern)
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for Meta {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Meta {
    type Error = LoggerError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Err(LoggerError::InvalidMeta("null".to_string())),
            Value::Bool(_) => Err(LoggerError::InvalidMeta("boolean".to_string())),
            Value::Number(_) => Err(LoggerError::InvalidMeta("number".to_string())),
            Value::String(_) => Err(LoggerError::InvalidMeta("string".to_string())),
            Value::Array(_) => Err(LoggerError::InvalidMeta("array".to_string())),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

/// Shallow-merge two optional mappings into a new one.
///
/// Keys of `b` overwrite keys of `a`; `None` counts as an empty mapping.
/// Neither input is modified.
#[must_use]
pub fn merge_tags(a: Option<&Meta>, b: Option<&Meta>) -> Meta {
    let mut merged = a.cloned().unwrap_or_default();
    if let Some(b) = b {
        for (key, value) in b.iter() {
            merged.fields.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_disjoint() {
        let a = Meta::new().with_field("k1", "v1").with_field("k2", "v2");
        let b = Meta::new().with_field("k3", "v3").with_field("k4", "v4");

        let merged = merge_tags(Some(&a), Some(&b));
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn test_merge_with_missing_side() {
        let a = Meta::new().with_field("k1", "v1").with_field("k2", "v2");

        assert_eq!(merge_tags(Some(&a), None), a);
        assert_eq!(merge_tags(None, Some(&a)), a);
        assert!(merge_tags(None, None).is_empty());
    }

    #[test]
    fn test_merge_right_wins() {
        let a = Meta::new().with_field("k", 1).with_field("only_a", true);
        let b = Meta::new().with_field("k", 2);

        let merged = merge_tags(Some(&a), Some(&b));
        assert_eq!(merged.get("k"), Some(&json!(2)));
        assert_eq!(merged.get("only_a"), Some(&json!(true)));

        // inputs untouched
        assert_eq!(a.get("k"), Some(&json!(1)));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let meta = Meta::new()
            .with_field("zeta", 1)
            .with_field("alpha", 2)
            .with_field("mid", 3);
        assert_eq!(meta.to_string(), r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_try_from_value() {
        let meta = Meta::try_from(json!({"req": 42})).unwrap();
        assert_eq!(meta.get("req"), Some(&json!(42)));

        let err = Meta::try_from(json!([1, 2])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidMeta(_)));
    }

    #[test]
    fn test_from_iterator() {
        let meta: Meta = vec![("env", "prod"), ("region", "eu")].into_iter().collect();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get("region"), Some(&json!("eu")));
    }
}
