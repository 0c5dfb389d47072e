//! Equality constraints: `eq`, `ne`

use serde_json::Value;

use super::values_equal;
use crate::foundation::{Constraint, ConstraintKind, Rule, SchemaBuilder};

/// Equality constraints against a reference value.
///
/// Numbers compare numerically, so `eq(1)` accepts `1.0`.
pub trait EqualityComparable: SchemaBuilder {
    /// Requires the value to equal `reference`.
    fn eq(self, reference: impl Into<Value>) -> Self {
        push_equality(self, ConstraintKind::Eq, reference.into(), true)
    }

    /// Requires the value to differ from `reference`.
    fn ne(self, reference: impl Into<Value>) -> Self {
        push_equality(self, ConstraintKind::Ne, reference.into(), false)
    }
}

fn push_equality<S: SchemaBuilder>(
    mut schema: S,
    kind: ConstraintKind,
    reference: Value,
    expect_equal: bool,
) -> S {
    let constraint = Constraint::new(kind, Some(reference.clone()));
    schema.core_mut().push_rule(Rule::predicate(constraint, move |value| {
        values_equal(value, &reference) == expect_equal
    }));
    schema
}
