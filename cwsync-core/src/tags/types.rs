//! Tag data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

/// Opaque identifier of a remote resource (usually an ARN).
///
/// The value is passed through to the backend without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceArn(String);

impl ResourceArn {
    /// Wrap an identifier.
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceArn {
    fn from(arn: &str) -> Self {
        Self::new(arn)
    }
}

impl From<String> for ResourceArn {
    fn from(arn: String) -> Self {
        Self(arn)
    }
}

impl AsRef<str> for ResourceArn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A set of tags keyed by tag key.
///
/// Iteration order is unspecified. Two sets are equal when they hold the same
/// keys with the same values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(HashMap<String, String>);

impl TagSet {
    /// An empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tag, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a tag, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Value of a tag.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a tag with this key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Apply one operation to this set.
    pub fn apply(&mut self, operation: &TagOperation) {
        match operation {
            TagOperation::Upsert { key, value } => {
                self.0.insert(key.clone(), value.clone());
            }
            TagOperation::Remove { key } => {
                self.0.remove(key);
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TagSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<HashMap<String, String>> for TagSet {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl IntoIterator for TagSet {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One step of a tag mutation plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TagOperation {
    /// Add the tag, or overwrite its value.
    Upsert {
        /// Tag key.
        key: String,
        /// Desired value.
        value: String,
    },
    /// Delete the tag.
    Remove {
        /// Tag key.
        key: String,
    },
}

impl TagOperation {
    /// Build an upsert.
    pub fn upsert(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Upsert {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a removal.
    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    /// Key this operation targets.
    pub fn key(&self) -> &str {
        match self {
            Self::Upsert { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// A tag as exchanged with the remote tagging service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalTag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl ExternalTag {
    /// Create a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_set_equality_ignores_insertion_order() {
        let a: TagSet = [("env", "prod"), ("team", "obs")].into_iter().collect();
        let b: TagSet = [("team", "obs"), ("env", "prod")].into_iter().collect();
        assert_eq!(a, b);

        let c: TagSet = [("team", "obs"), ("env", "dev")].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn apply_operations() {
        let mut tags = TagSet::new();
        tags.apply(&TagOperation::upsert("env", "prod"));
        tags.apply(&TagOperation::upsert("owner", ""));
        assert_eq!(tags.get("env"), Some("prod"));
        assert_eq!(tags.get("owner"), Some(""));

        tags.apply(&TagOperation::remove("env"));
        assert!(!tags.contains_key("env"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn operation_serialization() {
        let json = serde_json::to_string(&TagOperation::remove("env"))
            .expect("Failed to serialize TagOperation");
        assert_eq!(json, r#"{"op":"remove","key":"env"}"#);
    }

    #[test]
    fn external_tag_uses_service_casing() {
        let json = serde_json::to_value(ExternalTag::new("env", "prod"))
            .expect("Failed to serialize ExternalTag");
        assert_eq!(json, serde_json::json!({"Key": "env", "Value": "prod"}));
    }
}
