//! Keyed-mapping schema

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use super::aggregate;
use crate::capabilities::EqualityComparable;
use crate::foundation::{
    Check, ConstraintKind, Rule, Schema, SchemaBuilder, SchemaCore, SchemaRef, Slot, TypeSet,
    ValidationError, ValueType, concat_path,
};

// ============================================================================
// MAPPING SCHEMA
// ============================================================================

/// Validates an object, then each declared field in declaration order.
///
/// Absent keys reach the field schema as [`Slot::Missing`], so `required()`
/// and `nullable()` can tell "absent" from "explicitly null". Each field's
/// output is written back under its key; keys the shape does not declare are
/// passed through untouched unless [`strict`](Self::strict) is set.
///
/// # Examples
///
/// ```
/// use schemata::prelude::*;
/// use serde_json::json;
///
/// let user = mapping()
///     .field("name", string().trim().required())
///     .field("age", number().integer().nullable());
///
/// let out = user.validate(json!({"name": "  Ada ", "age": null})).unwrap();
/// assert_eq!(out, json!({"name": "Ada", "age": null}));
/// ```
#[derive(Debug, Clone)]
pub struct MappingSchema {
    core: SchemaCore,
    fields: IndexMap<String, SchemaRef>,
    strict_rule: Option<usize>,
}

impl MappingSchema {
    /// Creates an optional, non-nullable mapping schema with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SchemaCore::new(TypeSet::single(ValueType::Object)),
            fields: IndexMap::new(),
            strict_rule: None,
        }
    }

    /// Replaces the declared fields.
    pub fn shape<K>(mut self, fields: impl IntoIterator<Item = (K, SchemaRef)>) -> Self
    where
        K: Into<String>,
    {
        self.fields = fields
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();
        self.refresh_strict();
        self
    }

    /// Declares one field, replacing an earlier declaration of the same name
    /// in place.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<SchemaRef>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self.refresh_strict();
        self
    }

    /// Rejects keys that no field declares, reporting them as `strict`.
    ///
    /// The check follows the shape: fields declared after `strict()` are
    /// still allowed.
    pub fn strict(mut self) -> Self {
        if self.strict_rule.is_none() {
            self.strict_rule = Some(self.core.rule_count());
            self.core.push_rule(Rule::new(self.strict_check()));
        }
        self
    }

    /// Returns the schema declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaRef> {
        self.fields.get(name)
    }

    /// Returns the declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, SchemaRef> {
        &self.fields
    }

    /// Returns `true` if undeclared keys are rejected.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict_rule.is_some()
    }

    fn refresh_strict(&mut self) {
        if let Some(index) = self.strict_rule {
            let check = self.strict_check();
            self.core.replace_check(index, check);
        }
    }

    fn strict_check(&self) -> Check {
        let declared: IndexSet<String> = self.fields.keys().cloned().collect();
        Arc::new(move |value: &Value| {
            let unknown: Vec<Value> = value
                .as_object()
                .into_iter()
                .flat_map(|object| object.keys())
                .filter(|key| !declared.contains(key.as_str()))
                .map(|key| Value::from(key.as_str()))
                .collect();

            if unknown.is_empty() {
                Ok(())
            } else {
                Err(
                    ValidationError::of_kind(ConstraintKind::Strict, Some(Value::Array(unknown)))
                        .with_invalid_value(Some(value.clone())),
                )
            }
        })
    }
}

impl Default for MappingSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for MappingSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl EqualityComparable for MappingSchema {}

impl Schema for MappingSchema {
    fn validate_at(
        &self,
        slot: Slot,
        abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        let mut object = match self.core.run(slot, path)? {
            Slot::Present(Value::Object(object)) => object,
            Slot::Present(Value::Null) => return Ok(Slot::Present(Value::Null)),
            Slot::Missing => return Ok(Slot::Missing),
            Slot::Present(other) => return Err(self.core.type_error(&other).with_path(path)),
        };

        let mut errors = Vec::new();

        for (name, schema) in &self.fields {
            let field_path = concat_path(path, name);
            let slot = Slot::from(object.get(name).cloned());

            match schema.validate_at(slot, abort_early, &field_path) {
                Ok(Slot::Present(value)) => {
                    object.insert(name.clone(), value);
                }
                Ok(Slot::Missing) => {}
                Err(error) if abort_early => {
                    return Err(error
                        .repath(field_path)
                        .with_invalid_value(Some(Value::Object(object))));
                }
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(Slot::Present(Value::Object(object)))
        } else {
            Err(aggregate(
                ConstraintKind::Object,
                path,
                errors,
                Value::Object(object),
            ))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateOptions;
    use crate::schemas::{array, mapping, number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn person() -> MappingSchema {
        mapping()
            .field("a", number().required())
            .field("b", string().trim())
    }

    #[test]
    fn collect_all_reports_missing_required_field() {
        let err = person()
            .validate_with(json!({"b": "ok"}), &ValidateOptions::collect_all())
            .unwrap_err();

        assert_eq!(err.kind(), &ConstraintKind::Object);
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].kind(), &ConstraintKind::Required);
        assert_eq!(err.errors[0].path, "a");
        assert_eq!(err.errors[0].invalid_value, None);
    }

    #[test]
    fn field_outputs_are_written_back() {
        let out = person().validate(json!({"a": 1, "b": "  ok  ", "extra": true})).unwrap();
        assert_eq!(out, json!({"a": 1, "b": "ok", "extra": true}));
    }

    #[test]
    fn missing_optional_field_stays_absent() {
        let out = person().validate(json!({"a": 1})).unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn explicit_null_is_not_missing() {
        let err = person().validate(json!({"a": null})).unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::NotNullable);
        assert_eq!(err.path, "a");
    }

    #[test]
    fn fail_fast_carries_the_mapping() {
        let err = person().validate(json!({"a": "one", "b": 2})).unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::Type);
        assert_eq!(err.path, "a");
        assert_eq!(err.invalid_value, Some(json!({"a": "one", "b": 2})));
    }

    #[test]
    fn fail_fast_drops_nested_detail() {
        let schema = mapping().field("items", array().of(number()));
        let err = schema.validate(json!({"items": [1, 2, "x"]})).unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::Type);
        assert_eq!(err.path, "items");
        assert!(!err.has_nested());
    }

    #[test]
    fn strict_reports_unknown_keys_in_input_order() {
        let err = person()
            .strict()
            .validate(json!({"z": 0, "a": 1, "y": 2}))
            .unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::Strict);
        assert_eq!(err.data(), Some(&json!(["z", "y"])));
        assert_eq!(err.message(), "Object contains unknown keys: z, y");
    }

    #[test]
    fn strict_follows_fields_declared_later() {
        let schema = mapping().strict().field("late", number());
        assert!(schema.validate(json!({"late": 1})).is_ok());
        assert!(schema.validate(json!({"other": 1})).is_err());
    }

    #[test]
    fn strict_message_survives_shape_changes() {
        let schema = mapping()
            .strict()
            .with_message("no extras")
            .shape([("a", SchemaRef::from(number()))]);
        assert_eq!(schema.validate(json!({"b": 1})).unwrap_err().message(), "no extras");
    }

    #[test]
    fn redeclared_field_keeps_position() {
        let schema = mapping()
            .field("a", number())
            .field("b", number())
            .field("a", string());
        let names: Vec<_> = schema.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(schema.validate(json!({"a": "text"})).is_ok());
    }

    #[test]
    fn non_object_is_a_type_error() {
        let err = person().validate(json!([1])).unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::Type);
        assert_eq!(err.path, "");
    }
}
