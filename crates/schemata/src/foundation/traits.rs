//! Core traits for the schema system
//!
//! [`Schema`] is the validation interface every node implements, including
//! composites that recurse into children. [`SchemaBuilder`] supplies the
//! chained builder methods shared by all variants on top of a
//! [`SchemaCore`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::core::{Rule, SchemaCore};
use super::error::{ErrorMessage, ValidationError};
use super::options::ValidateOptions;
use super::value::Slot;

// ============================================================================
// SCHEMA
// ============================================================================

/// A node of a schema tree.
///
/// Implementors only provide [`validate_at`](Schema::validate_at); the
/// convenience entry points build on it.
pub trait Schema: fmt::Debug + Send + Sync {
    /// Validates `slot` reported at `path`.
    ///
    /// `abort_early` only matters to composites: `true` re-raises the first
    /// child failure, `false` collects every child failure into one
    /// aggregate error.
    fn validate_at(&self, slot: Slot, abort_early: bool, path: &str)
    -> Result<Slot, ValidationError>;

    /// Validates `value` failing fast at the root path.
    fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        self.validate_with(value, &ValidateOptions::default())
    }

    /// Validates `value` with explicit options.
    fn validate_with(
        &self,
        value: Value,
        options: &ValidateOptions,
    ) -> Result<Value, ValidationError> {
        self.validate_at(Slot::Present(value), options.abort_early, &options.path)
            .map(Slot::unwrap_or_null)
    }
}

// ============================================================================
// SCHEMA REF
// ============================================================================

/// A shared handle to a schema node.
///
/// Composites hold their children as `SchemaRef`, so one schema can sit
/// under several parents. Builder methods consume and return nodes, so a
/// shared node is never mutated behind its parents' backs.
#[derive(Clone)]
pub struct SchemaRef(Arc<dyn Schema>);

impl SchemaRef {
    /// Wraps a schema.
    pub fn new<S>(schema: S) -> Self
    where
        S: Schema + 'static,
    {
        Self(Arc::new(schema))
    }

    /// Returns `true` if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Schema for SchemaRef {
    #[inline]
    fn validate_at(
        &self,
        slot: Slot,
        abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        self.0.validate_at(slot, abort_early, path)
    }
}

// ============================================================================
// SCHEMA BUILDER
// ============================================================================

/// Builder methods shared by every schema variant.
///
/// Each method consumes the node and returns it, so chains read
/// `string().max(50).required()`.
pub trait SchemaBuilder: Sized {
    /// Shared pipeline state.
    fn core(&self) -> &SchemaCore;

    /// Shared pipeline state, mutably.
    fn core_mut(&mut self) -> &mut SchemaCore;

    /// Rejects the missing-field sentinel with a `required` failure.
    fn required(mut self) -> Self {
        self.core_mut().set_required();
        self
    }

    /// Accepts the missing-field sentinel (the default).
    fn not_required(mut self) -> Self {
        self.core_mut().set_optional();
        self
    }

    /// Accepts null, skipping every other check for it.
    fn nullable(mut self) -> Self {
        self.core_mut().set_nullable();
        self
    }

    /// Rejects null with a `not_nullable` failure (the default).
    fn not_nullable(mut self) -> Self {
        self.core_mut().set_not_nullable();
        self
    }

    /// Appends a transform, run after the type check in declaration order.
    fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.core_mut().push_transform(Arc::new(transform));
        self
    }

    /// Appends a validator, run against the transformed value.
    ///
    /// The validator rejects by returning `Err`. A validator that panics is
    /// not caught; the panic unwinds through `validate`.
    fn test<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.core_mut().push_rule(Rule::new(Arc::new(check)));
        self
    }

    /// Overrides the message of the constraint added last.
    fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.core_mut().set_last_message(message.into());
        self
    }

    /// Returns `true` if a missing value is accepted.
    fn is_optional(&self) -> bool {
        self.core().is_optional()
    }

    /// Returns `true` if null is accepted.
    fn is_nullable(&self) -> bool {
        self.core().is_nullable()
    }
}
