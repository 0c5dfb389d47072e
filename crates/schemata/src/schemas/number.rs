//! Number schema

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::capabilities::comparable::push_ordering;
use crate::capabilities::{Comparable, EqualityComparable};
use crate::foundation::{
    Constraint, ConstraintKind, ErrorMessage, Rule, Schema, SchemaBuilder, SchemaCore, Slot,
    TypeSet, ValidationError, ValueType,
};

/// Validates JSON numbers, integral or not.
///
/// # Examples
///
/// ```
/// use schemata::prelude::*;
/// use serde_json::json;
///
/// let percent = number().ge(0).le(100).integer();
/// assert!(percent.validate(json!(42)).is_ok());
/// assert_eq!(percent.validate(json!(4.2)).unwrap_err().kind(), &ConstraintKind::Integer);
/// ```
#[derive(Debug, Clone)]
pub struct NumberSchema {
    core: SchemaCore,
}

impl NumberSchema {
    /// Creates an optional, non-nullable number schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SchemaCore::new(TypeSet::single(ValueType::Number)),
        }
    }

    /// Requires `value > 0`. Reported as `gt` with the `positive` message.
    pub fn positive(self) -> Self {
        push_ordering(
            self,
            ConstraintKind::Gt,
            Value::from(0),
            ErrorMessage::Catalog("positive".into()),
            |o| o == Ordering::Greater,
        )
    }

    /// Requires `value < 0`. Reported as `lt` with the `negative` message.
    pub fn negative(self) -> Self {
        push_ordering(
            self,
            ConstraintKind::Lt,
            Value::from(0),
            ErrorMessage::Catalog("negative".into()),
            |o| o == Ordering::Less,
        )
    }

    /// Requires a number without fractional part (`3.0` is accepted).
    pub fn integer(mut self) -> Self {
        self.core.push_rule(Rule::predicate(
            Constraint::new(ConstraintKind::Integer, None),
            |value| value.as_number().is_some_and(is_integral),
        ));
        self
    }

    /// Requires the value to be an exact multiple of `divisor`.
    ///
    /// A zero divisor rejects every value.
    pub fn multiple_of(mut self, divisor: impl Into<Value>) -> Self {
        let divisor = divisor.into();
        let constraint = Constraint::new(ConstraintKind::MultipleOf, Some(divisor.clone()));
        self.core.push_rule(Rule::predicate(constraint, move |value| {
            match (value.as_number(), divisor.as_number()) {
                (Some(value), Some(divisor)) => is_multiple(value, divisor),
                _ => false,
            }
        }));
        self
    }
}

fn is_integral(number: &Number) -> bool {
    number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|f| f.fract() == 0.0)
}

fn is_multiple(value: &Number, divisor: &Number) -> bool {
    // `i64::MIN % -1` overflows; every integer is a multiple of -1.
    if let (Some(v), Some(d)) = (value.as_i64(), divisor.as_i64()) {
        return d != 0 && v.checked_rem(d).is_none_or(|r| r == 0);
    }
    if let (Some(v), Some(d)) = (value.as_u64(), divisor.as_u64()) {
        return d != 0 && v.checked_rem(d) == Some(0);
    }
    match (value.as_f64(), divisor.as_f64()) {
        (Some(v), Some(d)) => d != 0.0 && v % d == 0.0,
        _ => false,
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for NumberSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl Comparable for NumberSchema {}
impl EqualityComparable for NumberSchema {}

impl Schema for NumberSchema {
    fn validate_at(
        &self,
        slot: Slot,
        _abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        self.core.run(slot, path)
    }
}
