//! Capability mixins
//!
//! Constraint families a schema variant opts into by implementing the trait:
//!
//! | Capability             | Methods                | Kinds                |
//! |------------------------|------------------------|----------------------|
//! | [`Comparable`]         | `le` `ge` `lt` `gt`    | `le` `ge` `lt` `gt`  |
//! | [`Measurable`]         | `length` `min` `max`   | `length` `min` `max` |
//! | [`EqualityComparable`] | `eq` `ne`              | `eq` `ne`            |
//!
//! Every method appends one validator to the node's [`SchemaCore`](crate::foundation::SchemaCore),
//! so the checks run after transforms, in declaration order.

pub mod comparable;
pub mod equality;
pub mod measurable;

use std::cmp::Ordering;

use serde_json::{Number, Value};

pub use comparable::Comparable;
pub use equality::EqualityComparable;
pub use measurable::Measurable;

/// Orders two values of the same domain type.
///
/// Numbers compare numerically (integers exactly), strings and booleans
/// naturally. Values of different types, arrays and objects are
/// incomparable and yield `None`.
#[must_use]
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Orders two JSON numbers, exactly when both are integers.
#[must_use]
pub fn compare_numbers(left: &Number, right: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return Some(a.cmp(&b));
    }
    left.as_f64()?.partial_cmp(&right.as_f64()?)
}

/// Equality where `1` and `1.0` are the same number.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(compare_values(&json!(1), &json!(1.5)), Some(Ordering::Less));
        assert_eq!(compare_values(&json!(-1), &json!(u64::MAX)), Some(Ordering::Less));
        assert!(values_equal(&json!(2), &json!(2.0)));
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert_eq!(compare_values(&json!("a"), &json!("b")), Some(Ordering::Less));
    }

    #[test]
    fn mixed_types_are_incomparable() {
        assert_eq!(compare_values(&json!(1), &json!("1")), None);
        assert_eq!(compare_values(&json!([1]), &json!([1])), None);
        assert!(!values_equal(&json!(1), &json!("1")));
    }
}
