//! The base validation pipeline shared by every schema
//!
//! [`SchemaCore`] owns what every schema node has in common: the accepted
//! types, the transform list, the validator list and the optional/nullable
//! flags. Its [`run`](SchemaCore::run) method is the single-node pipeline:
//!
//! 1. missing sentinel → `required` check
//! 2. null → `not_nullable` check (type check, transforms and validators skipped)
//! 3. type check
//! 4. transforms, in declaration order
//! 5. validators, in declaration order; the first failure stops the loop
//!
//! Failures from steps 3-5 are reported at the node's path, whatever path
//! the failing check itself set.

use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};

use super::error::{Constraint, ConstraintKind, ErrorMessage, ValidationError};
use super::value::{Slot, TypeSet, ValueType};

/// A value-to-value transform.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A validator: `Ok(())` to accept, `Err` to reject.
pub type Check = Arc<dyn Fn(&Value) -> Result<(), ValidationError> + Send + Sync>;

// ============================================================================
// RULE
// ============================================================================

/// A validator plus an optional message override.
#[derive(Clone)]
pub struct Rule {
    check: RuleCheck,
    message: Option<ErrorMessage>,
}

#[derive(Clone)]
enum RuleCheck {
    /// Raises `constraint`, already carrying any override, when `accept` is false.
    Predicate {
        constraint: Constraint,
        accept: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
    },
    Custom(Check),
}

impl Rule {
    /// Wraps a validator.
    pub fn new(check: Check) -> Self {
        Self {
            check: RuleCheck::Custom(check),
            message: None,
        }
    }

    /// Builds a rule that raises `constraint` when `accept` returns false.
    ///
    /// The raised error carries the rejected value.
    pub fn predicate<P>(constraint: Constraint, accept: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            check: RuleCheck::Predicate {
                constraint,
                accept: Arc::new(accept),
            },
            message: None,
        }
    }

    /// Sets the message reported when this rule fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: ErrorMessage) -> Self {
        self.set_message(message);
        self
    }

    fn set_message(&mut self, message: ErrorMessage) {
        if let RuleCheck::Predicate { constraint, .. } = &mut self.check {
            *constraint = constraint.clone().with_message(message.clone());
        }
        self.message = Some(message);
    }

    fn apply(&self, value: &Value) -> Result<(), ValidationError> {
        match &self.check {
            RuleCheck::Predicate { constraint, accept } => {
                if accept(value) {
                    Ok(())
                } else {
                    Err(ValidationError::new(constraint.clone())
                        .with_invalid_value(Some(value.clone())))
                }
            }
            RuleCheck::Custom(check) => check(value).map_err(|error| match &self.message {
                Some(message) => ValidationError {
                    constraint: Constraint::new(error.kind().clone(), error.data().cloned())
                        .with_message(message.clone()),
                    ..error
                },
                None => error,
            }),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraint = match &self.check {
            RuleCheck::Predicate { constraint, .. } => Some(constraint),
            RuleCheck::Custom(_) => None,
        };
        f.debug_struct("Rule")
            .field("check", &"<function>")
            .field("constraint", &constraint)
            .field("message", &self.message)
            .finish()
    }
}

// ============================================================================
// SCHEMA CORE
// ============================================================================

/// Which constraint `with_message` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastConstraint {
    None,
    Required,
    NotNullable,
    Rule,
}

/// State and pipeline shared by all schema variants.
///
/// Cloning is cheap: transforms and validators are reference-counted, so a
/// clone shares them with its source until either side appends more.
#[derive(Clone)]
pub struct SchemaCore {
    expected: TypeSet,
    transforms: Vec<Transform>,
    rules: Vec<Rule>,
    optional: bool,
    required_message: ErrorMessage,
    nullable: bool,
    not_nullable_message: ErrorMessage,
    last: LastConstraint,
}

impl SchemaCore {
    /// Creates an optional, non-nullable core accepting `expected`.
    #[must_use]
    pub fn new(expected: TypeSet) -> Self {
        Self {
            expected,
            transforms: Vec::new(),
            rules: Vec::new(),
            optional: true,
            required_message: ErrorMessage::Locale,
            nullable: false,
            not_nullable_message: ErrorMessage::Locale,
            last: LastConstraint::None,
        }
    }

    /// Returns the accepted types.
    #[must_use]
    pub fn expected(&self) -> &TypeSet {
        &self.expected
    }

    /// Replaces the accepted types.
    pub fn set_expected(&mut self, expected: TypeSet) {
        self.expected = expected;
    }

    /// Returns `true` if a missing value is accepted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns `true` if null is accepted.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Number of registered transforms.
    #[must_use]
    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Number of registered validators.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Marks the value as required.
    pub fn set_required(&mut self) {
        self.optional = false;
        self.required_message = ErrorMessage::Locale;
        self.last = LastConstraint::Required;
    }

    /// Marks the value as optional.
    pub fn set_optional(&mut self) {
        self.optional = true;
    }

    /// Accepts null.
    pub fn set_nullable(&mut self) {
        self.nullable = true;
    }

    /// Rejects null.
    pub fn set_not_nullable(&mut self) {
        self.nullable = false;
        self.not_nullable_message = ErrorMessage::Locale;
        self.last = LastConstraint::NotNullable;
    }

    /// Appends a transform.
    pub fn push_transform(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    /// Appends a validator.
    pub fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
        self.last = LastConstraint::Rule;
    }

    /// Swaps the check of the validator at `index`, keeping its position and
    /// message override. Out-of-range indices are ignored.
    pub fn replace_check(&mut self, index: usize, check: Check) {
        if let Some(rule) = self.rules.get_mut(index) {
            rule.check = RuleCheck::Custom(check);
        }
    }

    /// Overrides the message of the most recently added constraint.
    ///
    /// Does nothing if no constraint has been added yet.
    pub fn set_last_message(&mut self, message: ErrorMessage) {
        match self.last {
            LastConstraint::None => {}
            LastConstraint::Required => self.required_message = message,
            LastConstraint::NotNullable => self.not_nullable_message = message,
            LastConstraint::Rule => {
                if let Some(rule) = self.rules.last_mut() {
                    rule.set_message(message);
                }
            }
        }
    }

    /// Builds the `type` failure for `value`.
    #[must_use]
    pub fn type_error(&self, value: &Value) -> ValidationError {
        ValidationError::of_kind(
            ConstraintKind::Type,
            Some(json!({
                "expected": self.expected.to_json_value(),
                "actual": ValueType::of(value).as_str(),
            })),
        )
        .with_invalid_value(Some(value.clone()))
    }

    /// Runs the single-node pipeline.
    ///
    /// Returns the sentinel unchanged for an optional missing value, null for
    /// a nullable null value, and otherwise the transformed value.
    pub fn run(&self, slot: Slot, path: &str) -> Result<Slot, ValidationError> {
        let value = match slot {
            Slot::Missing if self.optional => return Ok(Slot::Missing),
            Slot::Missing => {
                tracing::trace!(path, kind = "required", "constraint violated");
                return Err(ValidationError::new(
                    Constraint::new(ConstraintKind::Required, None)
                        .with_message(self.required_message.clone()),
                )
                .with_path(path));
            }
            Slot::Present(Value::Null) if self.nullable => return Ok(Slot::Present(Value::Null)),
            Slot::Present(Value::Null) => {
                tracing::trace!(path, kind = "not_nullable", "constraint violated");
                return Err(ValidationError::new(
                    Constraint::new(ConstraintKind::NotNullable, None)
                        .with_message(self.not_nullable_message.clone()),
                )
                .with_path(path)
                .with_invalid_value(Some(Value::Null)));
            }
            Slot::Present(value) => value,
        };

        self.process(value).map(Slot::Present).map_err(|error| {
            tracing::trace!(path, kind = %error.kind(), "constraint violated");
            error.repath(path)
        })
    }

    fn process(&self, value: Value) -> Result<Value, ValidationError> {
        if !self.expected.accepts(&value) {
            return Err(self.type_error(&value));
        }

        let value = self
            .transforms
            .iter()
            .fold(value, |current, transform| transform(current));

        for rule in &self.rules {
            rule.apply(&value)?;
        }

        Ok(value)
    }
}

impl fmt::Debug for SchemaCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCore")
            .field("expected", &self.expected)
            .field("transforms", &self.transforms.len())
            .field("rules", &self.rules.len())
            .field("optional", &self.optional)
            .field("nullable", &self.nullable)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
