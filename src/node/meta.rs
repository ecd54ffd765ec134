//! Node metadata: an open key-value map with a reserved baseline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON object map for metadata fields (insertion order preserved).
pub type MetaMap = serde_json::Map<String, Value>;

/// Reserved keys always present after derivation.
pub mod keys {
    pub const ID: &str = "id";
    pub const CLASS: &str = "class";
    pub const TITLE: &str = "title";
    pub const ORDER: &str = "order";
    pub const DATE: &str = "date";
    pub const CREATED: &str = "created";
    pub const ACCESS: &str = "access";
    pub const NAME: &str = "name";
    pub const BASENAME: &str = "basename";
    pub const DIR: &str = "dir";
    pub const FILE: &str = "file";
    pub const TWIG: &str = "twig";
    pub const DESCRIPTION: &str = "description";
}

/// Metadata mapping for a content node.
///
/// Keys are open, not a closed schema: reading an absent key yields `None`
/// rather than erroring, writing any key inserts or overwrites it, and
/// presence checks reflect map membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeMeta(MetaMap);

impl NodeMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: MetaMap) -> Self {
        Self(map)
    }

    /// Read a value by key; absent keys yield `None`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Read an integer value by key.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Read a boolean value by key.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether a key is present in the map.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Merge `other` on top of this map; `other` wins on key collision.
    pub fn overlay(&mut self, other: MetaMap) {
        for (key, value) in other {
            self.0.insert(key, value);
        }
    }

    pub fn as_map(&self) -> &MetaMap {
        &self.0
    }

    pub fn into_map(self) -> MetaMap {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<MetaMap> for NodeMeta {
    fn from(map: MetaMap) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_key_is_none_not_error() {
        let meta = NodeMeta::new();
        assert_eq!(meta.get("missing"), None);
        assert!(!meta.has("missing"));
    }

    #[test]
    fn test_set_inserts_and_overwrites() {
        let mut meta = NodeMeta::new();
        meta.set("title", "First");
        assert_eq!(meta.get_str("title"), Some("First"));

        meta.set("title", "Second");
        assert_eq!(meta.get_str("title"), Some("Second"));
        assert!(meta.has("title"));
    }

    #[test]
    fn test_overlay_rightmost_wins() {
        let mut meta = NodeMeta::new();
        meta.set("title", "base");
        meta.set("order", 1);

        let mut over = MetaMap::new();
        over.insert("title".into(), json!("override"));
        over.insert("draft".into(), json!(true));
        meta.overlay(over);

        assert_eq!(meta.get_str("title"), Some("override"));
        assert_eq!(meta.get_i64("order"), Some(1));
        assert_eq!(meta.get_bool("draft"), Some(true));
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut meta = NodeMeta::new();
        meta.set("b", 1);
        meta.set("a", 2);
        let keys: Vec<_> = meta.as_map().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_serializes_transparently() {
        let mut meta = NodeMeta::new();
        meta.set("title", "Hello");
        meta.set("twig", false);
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"title":"Hello","twig":false}"#);
    }
}
