//! Core schema types and traits
//!
//! This module contains the building blocks every schema variant is made of:
//!
//! - **Value model**: [`Slot`] (present value or missing-field sentinel),
//!   [`ValueType`], [`TypeSet`]
//! - **Errors**: [`Constraint`], [`ConstraintKind`], [`ErrorMessage`],
//!   [`ValidationError`]
//! - **Engine**: [`SchemaCore`], the single-node pipeline
//! - **Traits**: [`Schema`], [`SchemaBuilder`], and the shared handle [`SchemaRef`]
//! - **Glue**: [`concat_path`], the message [`locale`] catalog, [`ValidateOptions`]
//!
//! # Error aggregation
//!
//! A single node reports at most one failure: its first failing check.
//! Composites decide per call whether to re-raise the first child failure
//! (`abort_early = true`) or to wrap every child failure in one aggregate
//! error (`abort_early = false`).

pub mod core;
pub mod error;
pub mod locale;
pub mod options;
pub mod path;
pub mod traits;
pub mod value;

pub use self::core::{Check, Rule, SchemaCore, Transform};
pub use error::{
    Constraint, ConstraintKind, ErrorMessage, MessageFn, ValidationError, display_value,
    render_template,
};
pub use locale::{Locale, LocaleError, locale, replace_locale, reset_locale, set_locale};
pub use options::ValidateOptions;
pub use path::{PathSegment, concat_path};
pub use traits::{Schema, SchemaBuilder, SchemaRef};
pub use value::{Slot, TypeSet, ValueType};

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;
