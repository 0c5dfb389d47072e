//! Prelude module for convenient imports.
//!
//! Provides a single `use schemata::prelude::*;` import that brings in the
//! builder traits, every schema factory and the error types.
//!
//! # Examples
//!
//! ```
//! use schemata::prelude::*;
//!
//! let username = string().trim().min(3).max(20).lowercase().required();
//! let age = number().integer().ge(18).nullable();
//! let tags = array().of(string().min(1)).max(10);
//! # let _ = (username, age, tags);
//! ```

// ============================================================================
// FOUNDATION: Traits, errors, options
// ============================================================================

pub use crate::foundation::{
    Constraint, ConstraintKind, ErrorMessage, Schema, SchemaBuilder, SchemaRef, Slot,
    ValidateOptions, ValidationError, ValidationResult, ValueType,
};

// ============================================================================
// CAPABILITIES: Constraint mixins
// ============================================================================

pub use crate::capabilities::{Comparable, EqualityComparable, Measurable};

// ============================================================================
// SCHEMAS: Variants and factories
// ============================================================================

pub use crate::schemas::{
    ArraySchema, MappingSchema, MixedSchema, NumberSchema, StringSchema, UnionSchema, array,
    mapping, mixed, number, string, union,
};

// ============================================================================
// JSON: Text adapter
// ============================================================================

pub use crate::json::{JsonError, JsonSchema, json};
