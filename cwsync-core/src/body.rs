//! Structural comparison of serialized configuration bodies.
//!
//! Resource bodies (a dashboard definition, for instance) are JSON documents
//! that the backend may return with different whitespace or key order than the
//! user wrote. Comparing them structurally avoids reporting drift for purely
//! cosmetic differences.
//!
//! Objects compare irrespective of key order, arrays compare element by
//! element in order, and scalars compare with their type (`1` is not `"1"`).
//! Numbers compare by value, so `300`, `300.0` and `3e2` are the same leaf.
//! When either body is not valid JSON, the raw strings are compared instead.

use serde_json::Value;

/// How a comparison reached its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonReason {
    /// Both bodies parsed and are structurally equal.
    ParsedEqual,
    /// Both bodies parsed and differ.
    ParsedDifferent,
    /// At least one body did not parse; the raw strings are identical.
    FallbackEqual,
    /// At least one body did not parse; the raw strings differ.
    FallbackDifferent,
}

/// Outcome of comparing two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyComparison {
    /// Whether the bodies are considered equal.
    pub equal: bool,
    /// Which branch produced the verdict.
    pub reason: ComparisonReason,
}

impl BodyComparison {
    fn parsed(equal: bool) -> Self {
        let reason = if equal {
            ComparisonReason::ParsedEqual
        } else {
            ComparisonReason::ParsedDifferent
        };
        Self { equal, reason }
    }

    fn fallback(equal: bool) -> Self {
        let reason = if equal {
            ComparisonReason::FallbackEqual
        } else {
            ComparisonReason::FallbackDifferent
        };
        Self { equal, reason }
    }
}

/// Compare two bodies and report how the verdict was reached.
pub fn compare(a: &str, b: &str) -> BodyComparison {
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => BodyComparison::parsed(same_value(&a, &b)),
        _ => {
            tracing::trace!("Body is not valid JSON, comparing as text");
            BodyComparison::fallback(a == b)
        }
    }
}

/// Whether two bodies represent the same document.
pub fn equal(a: &str, b: &str) -> bool {
    compare(a, b).equal
}

fn parse(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| same_value(a, b)))
        }
        _ => a == b,
    }
}
