//! Sequence schema

use serde_json::Value;

use super::aggregate;
use super::mixed::MixedSchema;
use crate::capabilities::Measurable;
use crate::foundation::{
    ConstraintKind, Schema, SchemaBuilder, SchemaCore, SchemaRef, Slot, TypeSet, ValidationError,
    ValueType, concat_path,
};

/// Validates a sequence, then every element against one item schema.
///
/// Elements are reported at `path[index]`. With `abort_early` the first
/// failing element is re-raised at its own path, keeping the element as its
/// invalid value; otherwise every failure is wrapped in one `array` error.
///
/// # Examples
///
/// ```
/// use schemata::prelude::*;
/// use serde_json::json;
///
/// let scores = array().of(number().integer()).max(3);
/// let err = scores
///     .validate_with(json!([1, 2.5, 3, "x"]), &ValidateOptions::collect_all())
///     .unwrap_err();
///
/// // The size check runs before any element is visited.
/// assert_eq!(err.kind(), &ConstraintKind::Max);
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema {
    core: SchemaCore,
    items: SchemaRef,
}

impl ArraySchema {
    /// Creates an optional, non-nullable sequence schema.
    ///
    /// Until [`of`](Self::of) is called, elements may have any type but must
    /// not be null.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SchemaCore::new(TypeSet::single(ValueType::Array)),
            items: SchemaRef::new(MixedSchema::new()),
        }
    }

    /// Sets the element schema.
    pub fn of(mut self, items: impl Into<SchemaRef>) -> Self {
        self.items = items.into();
        self
    }

    /// Returns the element schema.
    #[must_use]
    pub fn item_schema(&self) -> &SchemaRef {
        &self.items
    }
}

impl Default for ArraySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for ArraySchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl Measurable for ArraySchema {}

impl Schema for ArraySchema {
    fn validate_at(
        &self,
        slot: Slot,
        abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        let items = match self.core.run(slot, path)? {
            Slot::Present(Value::Array(items)) => items,
            Slot::Present(Value::Null) => return Ok(Slot::Present(Value::Null)),
            Slot::Missing => return Ok(Slot::Missing),
            Slot::Present(other) => return Err(self.core.type_error(&other).with_path(path)),
        };

        let mut output = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let item_path = concat_path(path, index);
            match self
                .items
                .validate_at(Slot::Present(item.clone()), abort_early, &item_path)
            {
                Ok(slot) => output.push(slot.unwrap_or_null()),
                Err(error) if abort_early => return Err(error.repath(item_path)),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(Slot::Present(Value::Array(output)))
        } else {
            Err(aggregate(
                ConstraintKind::Array,
                path,
                errors,
                Value::Array(items),
            ))
        }
    }
}
