//! Value model seen by schemas
//!
//! Schemas validate `serde_json::Value`. Inside the engine a value travels as a
//! [`Slot`], which adds the one state JSON cannot express: a mapping key that
//! is absent from its parent. Keeping it separate from `Value::Null` lets the
//! engine tell "required" failures apart from "not nullable" failures.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

// ============================================================================
// SLOT
// ============================================================================

/// A value as seen by a schema: present (possibly null) or missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    /// The key was absent from the parent mapping.
    #[default]
    Missing,
    /// The value is present. `Value::Null` is an explicit null.
    Present(Value),
}

impl Slot {
    /// Returns `true` for the missing-field sentinel.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the present value, if any.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Missing => None,
            Self::Present(value) => Some(value),
        }
    }

    /// Converts into an `Option`, mapping the sentinel to `None`.
    #[must_use]
    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Missing => None,
            Self::Present(value) => Some(value),
        }
    }

    /// Unwraps the present value; the sentinel becomes `Value::Null`.
    #[must_use]
    pub fn unwrap_or_null(self) -> Value {
        self.into_option().unwrap_or(Value::Null)
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Self::Present(value)
    }
}

impl From<Option<Value>> for Slot {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Missing, Self::Present)
    }
}

// ============================================================================
// VALUE TYPE
// ============================================================================

/// Type tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any JSON number, integral or not.
    Number,
    /// A string.
    String,
    /// A sequence.
    Array,
    /// A keyed mapping.
    Object,
}

impl ValueType {
    /// Returns the type tag of `value`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the lowercase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TYPE SET
// ============================================================================

/// The set of type tags a schema accepts.
///
/// An empty set means "any type".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeSet {
    tags: SmallVec<[ValueType; 2]>,
}

impl TypeSet {
    /// Accepts every type.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Accepts exactly one type.
    #[must_use]
    pub fn single(tag: ValueType) -> Self {
        Self {
            tags: SmallVec::from_slice(&[tag]),
        }
    }

    /// Accepts any of the given types. An empty list accepts everything.
    pub fn of(tags: impl IntoIterator<Item = ValueType>) -> Self {
        let mut set = SmallVec::new();
        for tag in tags {
            if !set.contains(&tag) {
                set.push(tag);
            }
        }
        Self { tags: set }
    }

    /// Returns `true` when the set places no restriction.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns `true` if `value` has one of the accepted types.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        self.is_any() || self.tags.contains(&ValueType::of(value))
    }

    /// Returns the accepted tags.
    #[must_use]
    pub fn tags(&self) -> &[ValueType] {
        &self.tags
    }

    /// Renders the set as a JSON array of type names (`["any"]` when unrestricted).
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        if self.is_any() {
            return Value::Array(vec![Value::from("any")]);
        }
        Value::Array(self.tags.iter().map(|t| Value::from(t.as_str())).collect())
    }
}
