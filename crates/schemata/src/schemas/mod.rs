//! Concrete schema variants
//!
//! Each factory returns a fresh, optional, non-nullable node:
//!
//! | Factory       | Type            | Capabilities                          |
//! |---------------|-----------------|---------------------------------------|
//! | [`string()`]  | [`StringSchema`]  | size, ordering, equality, formats   |
//! | [`number()`]  | [`NumberSchema`]  | ordering, equality, numeric checks  |
//! | [`mixed()`]   | [`MixedSchema`]   | equality, type narrowing, `one_of`  |
//! | [`array()`]   | [`ArraySchema`]   | size, per-element item schema       |
//! | [`mapping()`] | [`MappingSchema`] | equality, per-field schemas         |
//! | [`union()`]   | [`UnionSchema`]   | equality, alternation               |

pub mod array;
pub mod mapping;
pub mod mixed;
pub mod number;
pub mod string;
pub mod union;

use serde_json::Value;

pub use array::ArraySchema;
pub use mapping::MappingSchema;
pub use mixed::MixedSchema;
pub use number::NumberSchema;
pub use string::StringSchema;
pub use union::UnionSchema;

use crate::foundation::{ConstraintKind, SchemaRef, ValidationError};

/// Creates a string schema.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Creates a number schema.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// Creates a schema accepting any type.
#[must_use]
pub fn mixed() -> MixedSchema {
    MixedSchema::new()
}

/// Creates a sequence schema.
#[must_use]
pub fn array() -> ArraySchema {
    ArraySchema::new()
}

/// Creates a keyed-mapping schema.
#[must_use]
pub fn mapping() -> MappingSchema {
    MappingSchema::new()
}

/// Creates a union schema.
#[must_use]
pub fn union() -> UnionSchema {
    UnionSchema::new()
}

macro_rules! impl_into_schema_ref {
    ($($schema:ty),* $(,)?) => {
        $(
            impl From<$schema> for SchemaRef {
                fn from(schema: $schema) -> Self {
                    SchemaRef::new(schema)
                }
            }
        )*
    };
}

impl_into_schema_ref!(
    StringSchema,
    NumberSchema,
    MixedSchema,
    ArraySchema,
    MappingSchema,
    UnionSchema,
);

/// Wraps collected child failures into one aggregate error.
pub(crate) fn aggregate(
    kind: ConstraintKind,
    path: &str,
    errors: Vec<ValidationError>,
    value: Value,
) -> ValidationError {
    tracing::debug!(
        path,
        kind = kind.as_str(),
        children = errors.len(),
        "aggregate validation failure"
    );
    ValidationError::of_kind(kind, None)
        .with_path(path)
        .with_errors(errors)
        .with_invalid_value(Some(value))
}
