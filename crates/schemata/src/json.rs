//! JSON-text adapter
//!
//! Decodes raw text with `serde_json` and forwards the decoded value to a
//! schema. Parse failures belong to this layer, not to the engine:
//!
//! - [`JsonSchema::parse_and_validate`] reports them as [`JsonError::Parse`];
//! - used as a schema node (e.g. a mapping field holding embedded JSON
//!   text), a [`JsonSchema`] reports them as a `json` constraint at the
//!   node's path.
//!
//! # Examples
//!
//! ```
//! use schemata::json::{JsonError, json};
//! use schemata::prelude::*;
//! use serde_json::json as value;
//!
//! let payload = json(mapping().field("id", number().integer().required()));
//!
//! assert_eq!(payload.parse_and_validate(r#"{"id": 4}"#).unwrap(), value!({"id": 4}));
//! assert!(matches!(payload.parse_and_validate("{"), Err(JsonError::Parse(_))));
//! assert!(matches!(payload.parse_and_validate("{}"), Err(JsonError::Invalid(_))));
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::foundation::{
    ConstraintKind, Schema, SchemaBuilder, SchemaCore, SchemaRef, Slot, TypeSet, ValidateOptions,
    ValidationError, ValueType,
};

/// Failure of [`JsonSchema::parse_and_validate`].
#[derive(Debug, Error)]
pub enum JsonError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The decoded value failed validation.
    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationError),
}

/// A schema over JSON text: a string that must decode to a value accepted
/// by the inner schema.
#[derive(Debug, Clone)]
pub struct JsonSchema<S> {
    core: SchemaCore,
    inner: S,
}

impl<S: Schema> JsonSchema<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            core: SchemaCore::new(TypeSet::single(ValueType::String)),
            inner,
        }
    }

    /// Returns the schema applied to the decoded value.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Decodes `text` and validates the result, failing fast at the root.
    pub fn parse_and_validate(&self, text: &str) -> Result<Value, JsonError> {
        self.parse_and_validate_with(text, &ValidateOptions::default())
    }

    /// Decodes `text` and validates the result with explicit options.
    pub fn parse_and_validate_with(
        &self,
        text: &str,
        options: &ValidateOptions,
    ) -> Result<Value, JsonError> {
        let decoded: Value = serde_json::from_str(text)?;
        Ok(self.inner.validate_with(decoded, options)?)
    }
}

impl<S: Schema> SchemaBuilder for JsonSchema<S> {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl<S: Schema> Schema for JsonSchema<S> {
    fn validate_at(
        &self,
        slot: Slot,
        abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        let text = match self.core.run(slot, path)? {
            Slot::Present(Value::String(text)) => text,
            Slot::Present(Value::Null) => return Ok(Slot::Present(Value::Null)),
            Slot::Missing => return Ok(Slot::Missing),
            Slot::Present(other) => return Err(self.core.type_error(&other).with_path(path)),
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(decoded) => self
                .inner
                .validate_at(Slot::Present(decoded), abort_early, path),
            Err(error) => {
                tracing::trace!(path, kind = "json", "constraint violated");
                Err(
                    ValidationError::of_kind(ConstraintKind::Json, Some(Value::from(error.to_string())))
                        .with_path(path)
                        .with_invalid_value(Some(Value::String(text))),
                )
            }
        }
    }
}

impl<S: Schema + 'static> From<JsonSchema<S>> for SchemaRef {
    fn from(schema: JsonSchema<S>) -> Self {
        SchemaRef::new(schema)
    }
}

/// Wraps `schema` in a [`JsonSchema`].
pub fn json<S: Schema>(schema: S) -> JsonSchema<S> {
    JsonSchema::new(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{array, mapping, number, string};
    use serde_json::json as value;

    #[test]
    fn decodes_then_validates() {
        let schema = json(array().of(number()));
        assert_eq!(schema.parse_and_validate("[1, 2]").unwrap(), value!([1, 2]));
        let Err(JsonError::Invalid(error)) = schema.parse_and_validate(r#"[1, "2"]"#) else {
            panic!("expected a validation failure");
        };
        assert_eq!(error.path, "[1]");
    }

    #[test]
    fn parse_errors_are_adapter_errors() {
        let err = json(number()).parse_and_validate("1 2").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn embedded_text_field_is_decoded() {
        let schema = mapping().field("meta", json(mapping().field("v", number().required())));
        let out = schema.validate(value!({"meta": "{\"v\": 3}"})).unwrap();
        assert_eq!(out, value!({"meta": {"v": 3}}));
    }

    #[test]
    fn embedded_parse_failure_is_a_json_constraint() {
        let schema = mapping().field("meta", json(number()));
        let err = schema.validate(value!({"meta": "{oops"})).unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::Json);
        assert_eq!(err.path, "meta");
        assert!(err.message().starts_with("Value must be valid JSON: "));
    }

    #[test]
    fn embedded_value_must_be_text() {
        let err = json(string()).validate(value!(5)).unwrap_err();
        assert_eq!(err.kind(), &ConstraintKind::Type);
    }

    #[test]
    fn optional_and_nullable_apply_to_the_text() {
        let schema = mapping().field("meta", json(number()).nullable());
        assert_eq!(schema.validate(value!({})).unwrap(), value!({}));
        assert_eq!(
            schema.validate(value!({"meta": null})).unwrap(),
            value!({"meta": null})
        );
    }
}
