//! Macros for declaring heterogeneous schema trees.
//!
//! # Available Macros
//!
//! - [`shape!`]: a mapping schema from `"name" => schema` pairs
//! - [`one_of!`]: a union schema from a list of option schemas
//!
//! # Examples
//!
//! ```
//! use schemata::prelude::*;
//! use schemata::{one_of, shape};
//! use serde_json::json;
//!
//! let event = shape! {
//!     "kind" => mixed().one_of([json!("click"), json!("view")]).required(),
//!     "target" => one_of![number().integer(), string().min(1)],
//!     "tags" => array().of(string()).max(8),
//! };
//!
//! assert!(event.validate(json!({"kind": "click", "target": "nav"})).is_ok());
//! ```

// ============================================================================
// SHAPE MACRO
// ============================================================================

/// Builds a mapping schema whose fields may have different schema types.
///
/// Expands to a chain of [`MappingSchema::field`](crate::schemas::MappingSchema::field)
/// calls, so fields keep declaration order.
///
/// ```
/// use schemata::prelude::*;
/// use schemata::shape;
///
/// let point = shape! { "x" => number().required(), "y" => number().required() };
/// assert_eq!(point.fields().len(), 2);
/// ```
#[macro_export]
macro_rules! shape {
    () => {
        $crate::schemas::mapping()
    };
    ($($name:expr => $schema:expr),+ $(,)?) => {
        $crate::schemas::mapping()$(.field($name, $schema))+
    };
}

// ============================================================================
// ONE_OF MACRO
// ============================================================================

/// Builds a union schema whose options may have different schema types.
///
/// ```
/// use schemata::prelude::*;
/// use schemata::one_of;
/// use serde_json::json;
///
/// let id = one_of![number().integer(), string().uuid()];
/// assert!(id.validate(json!(12)).is_ok());
/// ```
#[macro_export]
macro_rules! one_of {
    () => {
        $crate::schemas::union()
    };
    ($($option:expr),+ $(,)?) => {
        $crate::schemas::union()$(.option($option))+
    };
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::foundation::{ConstraintKind, Schema, SchemaBuilder, ValidateOptions};
    use crate::schemas::{number, string};
    use serde_json::json;

    #[test]
    fn shape_keeps_declaration_order() {
        let schema = shape! {
            "b" => string(),
            "a" => number(),
        };
        let names: Vec<_> = schema.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn shape_fields_validate() {
        let schema = shape! { "n" => number().required() };
        let err = schema
            .validate_with(json!({}), &ValidateOptions::collect_all())
            .unwrap_err();
        assert_eq!(err.errors[0].kind(), &ConstraintKind::Required);
    }

    #[test]
    fn empty_macros_build_empty_schemas() {
        assert!(shape!().fields().is_empty());
        assert!(one_of![].options().is_empty());
    }

    #[test]
    fn one_of_tries_every_option() {
        let schema = one_of![number(), string()].required();
        assert!(schema.validate(json!("x")).is_ok());
        assert!(schema.validate(json!(1)).is_ok());
        assert_eq!(
            schema.validate(json!([])).unwrap_err().kind(),
            &ConstraintKind::OneOf
        );
    }
}
