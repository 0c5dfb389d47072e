//! Wildcard schema

use serde_json::Value;

use crate::capabilities::{EqualityComparable, values_equal};
use crate::foundation::{
    Constraint, ConstraintKind, Rule, Schema, SchemaBuilder, SchemaCore, Slot, TypeSet,
    ValidationError, ValueType,
};

/// Accepts a value of any type unless narrowed with [`of`](Self::of).
///
/// # Examples
///
/// ```
/// use schemata::prelude::*;
/// use serde_json::json;
///
/// let flag = mixed().one_of([json!("on"), json!("off"), json!(true)]);
/// assert!(flag.validate(json!(true)).is_ok());
/// assert_eq!(flag.validate(json!("maybe")).unwrap_err().kind(), &ConstraintKind::OneOf);
/// ```
#[derive(Debug, Clone)]
pub struct MixedSchema {
    core: SchemaCore,
}

impl MixedSchema {
    /// Creates an optional, non-nullable schema accepting every type.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SchemaCore::new(TypeSet::any()),
        }
    }

    /// Restricts the accepted types.
    pub fn of(mut self, types: impl IntoIterator<Item = ValueType>) -> Self {
        self.core.set_expected(TypeSet::of(types));
        self
    }

    /// Requires the value to equal one of `allowed`.
    pub fn one_of(mut self, allowed: impl IntoIterator<Item = Value>) -> Self {
        let allowed: Vec<Value> = allowed.into_iter().collect();
        let constraint = Constraint::new(ConstraintKind::OneOf, Some(Value::Array(allowed.clone())));
        self.core.push_rule(Rule::predicate(constraint, move |value| {
            allowed.iter().any(|candidate| values_equal(value, candidate))
        }));
        self
    }
}

impl Default for MixedSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for MixedSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl EqualityComparable for MixedSchema {}

impl Schema for MixedSchema {
    fn validate_at(
        &self,
        slot: Slot,
        _abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        self.core.run(slot, path)
    }
}
