//! Size constraints: `length`, `min`, `max`

use serde_json::Value;

use crate::foundation::{Constraint, ConstraintKind, Rule, SchemaBuilder};

/// Size of a value: characters of a string, elements of an array, entries of
/// an object. Other values have no size.
#[must_use]
pub fn size_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// Size constraints against a fixed limit.
///
/// A value without a size fails the constraint.
pub trait Measurable: SchemaBuilder {
    /// Requires exactly `limit` elements/characters.
    fn length(self, limit: usize) -> Self {
        push_size(self, ConstraintKind::Length, limit, |size, limit| size == limit)
    }

    /// Requires at least `limit` elements/characters.
    fn min(self, limit: usize) -> Self {
        push_size(self, ConstraintKind::Min, limit, |size, limit| size >= limit)
    }

    /// Requires at most `limit` elements/characters.
    fn max(self, limit: usize) -> Self {
        push_size(self, ConstraintKind::Max, limit, |size, limit| size <= limit)
    }
}

fn push_size<S: SchemaBuilder>(
    mut schema: S,
    kind: ConstraintKind,
    limit: usize,
    accept: fn(usize, usize) -> bool,
) -> S {
    let constraint = Constraint::new(kind, Some(Value::from(limit)));
    schema.core_mut().push_rule(Rule::predicate(constraint, move |value| {
        size_of(value).is_some_and(|size| accept(size, limit))
    }));
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_measure_in_chars() {
        assert_eq!(size_of(&json!("héllo")), Some(5));
    }

    #[test]
    fn scalars_have_no_size() {
        assert_eq!(size_of(&json!(12)), None);
        assert_eq!(size_of(&json!(null)), None);
    }
}
