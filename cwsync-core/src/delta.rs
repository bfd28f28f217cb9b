//! Per-field difference report between two versions of a resource.
//!
//! A [`Delta`] collects the fields whose desired and observed values differ.
//! Most fields use plain equality; body-valued fields go through
//! [`body::equal`](crate::body::equal) and tags are compared as [`TagSet`]s.

use crate::body;
use crate::tags::TagSet;
use serde::Serialize;
use serde_json::Value;

/// A single field that differs between two resources.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Dotted path of the field (e.g. `spec.dashboardBody`).
    pub path: String,
    /// Value on the first resource, `None` when unset.
    pub a: Option<Value>,
    /// Value on the second resource, `None` when unset.
    pub b: Option<Value>,
}

/// Collection of differences between two resources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    differences: Vec<Difference>,
}

impl Delta {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a difference at `path`.
    pub fn add(&mut self, path: impl Into<String>, a: Option<Value>, b: Option<Value>) {
        self.differences.push(Difference {
            path: path.into(),
            a,
            b,
        });
    }

    /// Compare an optional field by value.
    ///
    /// A field set on one side and unset on the other is a difference.
    pub fn compare_field<T>(&mut self, path: &str, a: &Option<T>, b: &Option<T>)
    where
        T: PartialEq + Serialize,
    {
        let differs = match (a, b) {
            (None, None) => false,
            (Some(a), Some(b)) => a != b,
            _ => true,
        };
        if differs {
            self.add(path, snapshot(a), snapshot(b));
        }
    }

    /// Compare a field that is always present.
    pub fn compare_value<T>(&mut self, path: &str, a: &T, b: &T)
    where
        T: PartialEq + Serialize,
    {
        if a != b {
            self.add(path, to_value(a), to_value(b));
        }
    }

    /// Compare an optional serialized body structurally.
    pub fn compare_body(&mut self, path: &str, a: &Option<String>, b: &Option<String>) {
        let differs = match (a, b) {
            (None, None) => false,
            (Some(a), Some(b)) => !body::equal(a, b),
            _ => true,
        };
        if differs {
            self.add(path, snapshot(a), snapshot(b));
        }
    }

    /// Compare two tag sets.
    pub fn compare_tags(&mut self, path: &str, a: &TagSet, b: &TagSet) {
        if a != b {
            self.add(path, to_value(a), to_value(b));
        }
    }

    /// Whether no differences were recorded.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Number of differences.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Whether a difference was recorded at `path` or below it.
    pub fn differs_at(&self, path: &str) -> bool {
        self.differences.iter().any(|d| {
            d.path == path
                || d.path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// All recorded differences.
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    /// Paths of all recorded differences.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.differences.iter().map(|d| d.path.as_str())
    }
}

fn snapshot<T: Serialize>(value: &Option<T>) -> Option<Value> {
    value.as_ref().and_then(to_value)
}

fn to_value<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}
