//! Ordering constraints: `le`, `ge`, `lt`, `gt`

use std::cmp::Ordering;

use serde_json::Value;

use super::compare_values;
use crate::foundation::{Constraint, ConstraintKind, ErrorMessage, Rule, SchemaBuilder};

/// Ordering constraints against a fixed limit.
///
/// The transformed value is compared with the limit using the natural order
/// of its type. A value that cannot be ordered against the limit (e.g. a
/// string against a numeric limit) fails the constraint.
///
/// # Examples
///
/// ```
/// use schemata::prelude::*;
/// use serde_json::json;
///
/// let age = number().ge(0).lt(150);
/// assert!(age.validate(json!(42)).is_ok());
/// assert_eq!(age.validate(json!(150)).unwrap_err().kind(), &ConstraintKind::Lt);
/// ```
pub trait Comparable: SchemaBuilder {
    /// Requires `value <= limit`.
    fn le(self, limit: impl Into<Value>) -> Self {
        push_ordering(self, ConstraintKind::Le, limit.into(), ErrorMessage::Locale, |o| {
            o != Ordering::Greater
        })
    }

    /// Requires `value >= limit`.
    fn ge(self, limit: impl Into<Value>) -> Self {
        push_ordering(self, ConstraintKind::Ge, limit.into(), ErrorMessage::Locale, |o| {
            o != Ordering::Less
        })
    }

    /// Requires `value < limit`.
    fn lt(self, limit: impl Into<Value>) -> Self {
        push_ordering(self, ConstraintKind::Lt, limit.into(), ErrorMessage::Locale, |o| {
            o == Ordering::Less
        })
    }

    /// Requires `value > limit`.
    fn gt(self, limit: impl Into<Value>) -> Self {
        push_ordering(self, ConstraintKind::Gt, limit.into(), ErrorMessage::Locale, |o| {
            o == Ordering::Greater
        })
    }
}

/// Appends an ordering check; `accept` receives `value.cmp(limit)`.
pub(crate) fn push_ordering<S: SchemaBuilder>(
    mut schema: S,
    kind: ConstraintKind,
    limit: Value,
    message: ErrorMessage,
    accept: fn(Ordering) -> bool,
) -> S {
    let constraint = Constraint::new(kind, Some(limit.clone())).with_message(message);
    schema.core_mut().push_rule(Rule::predicate(constraint, move |value| {
        compare_values(value, &limit).is_some_and(accept)
    }));
    schema
}
