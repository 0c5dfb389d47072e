//! Error types for validation failures
//!
//! A failure is described by a [`Constraint`] (what was violated) wrapped in a
//! [`ValidationError`] (where it was violated, on which value, and which child
//! failures it aggregates). Messages are rendered when read, not when the
//! error is raised, so catalog overrides apply to errors already in flight.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};

use super::locale;

// ============================================================================
// CONSTRAINT KIND
// ============================================================================

/// The kind of rule a value violated.
///
/// Each kind doubles as the message catalog key returned by [`as_str`](Self::as_str).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// A required field was missing.
    Required,
    /// A non-nullable value was null.
    NotNullable,
    /// The value had an unexpected type.
    Type,
    /// Aggregate of element failures in a sequence.
    Array,
    /// Aggregate of field failures in a mapping.
    Object,
    /// No union option matched, or a value was outside an allowed set.
    OneOf,
    /// `value <= limit` failed.
    Le,
    /// `value >= limit` failed.
    Ge,
    /// `value < limit` failed.
    Lt,
    /// `value > limit` failed.
    Gt,
    /// `value == reference` failed.
    Eq,
    /// `value != reference` failed.
    Ne,
    /// Size differed from the exact length.
    Length,
    /// Size was below the minimum.
    Min,
    /// Size was above the maximum.
    Max,
    /// A string did not match a pattern.
    Matches,
    /// A string was not an email address.
    Email,
    /// A string was not a URL.
    Url,
    /// A string was not a UUID.
    Uuid,
    /// A string contained uppercase characters.
    Lowercase,
    /// A string contained lowercase characters.
    Uppercase,
    /// A number had a fractional part.
    Integer,
    /// A number was not a multiple of the divisor.
    MultipleOf,
    /// A mapping contained undeclared keys.
    Strict,
    /// Embedded JSON text failed to parse.
    Json,
    /// A user-defined rule.
    Custom(Cow<'static, str>),
}

impl ConstraintKind {
    /// Returns the stable string code of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::NotNullable => "not_nullable",
            Self::Type => "type",
            Self::Array => "array",
            Self::Object => "object",
            Self::OneOf => "one_of",
            Self::Le => "le",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Length => "length",
            Self::Min => "min",
            Self::Max => "max",
            Self::Matches => "matches",
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::Integer => "integer",
            Self::MultipleOf => "multiple_of",
            Self::Strict => "strict",
            Self::Json => "json",
            Self::Custom(code) => code,
        }
    }

    /// Returns `true` for kinds raised by composite schemas over child errors.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Array | Self::Object | Self::OneOf)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ERROR MESSAGE
// ============================================================================

/// Renders a constraint into a message.
pub type MessageFn = Arc<dyn Fn(&Constraint) -> String + Send + Sync>;

/// Where the message of a constraint comes from.
#[derive(Clone, Default)]
pub enum ErrorMessage {
    /// The catalog entry for the constraint's own kind, looked up at render time.
    #[default]
    Locale,
    /// The catalog entry under another key, looked up at render time.
    Catalog(Cow<'static, str>),
    /// A fixed template. `{data}` and `{<key>}` placeholders are substituted.
    Text(Cow<'static, str>),
    /// A function of the constraint.
    Render(MessageFn),
}

impl ErrorMessage {
    /// Builds a message from a rendering function.
    pub fn from_fn<F>(render: F) -> Self
    where
        F: Fn(&Constraint) -> String + Send + Sync + 'static,
    {
        Self::Render(Arc::new(render))
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale => f.write_str("Locale"),
            Self::Catalog(key) => f.debug_tuple("Catalog").field(key).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Render(_) => f.write_str("Render(<function>)"),
        }
    }
}

impl From<&'static str> for ErrorMessage {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for ErrorMessage {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

// ============================================================================
// CONSTRAINT
// ============================================================================

/// A violated rule: kind, contextual data and message source.
///
/// Fixed once built; a different message means a different constraint.
#[derive(Debug, Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    data: Option<Value>,
    message: ErrorMessage,
}

impl Constraint {
    /// Creates a constraint with a catalog message.
    #[must_use]
    pub fn new(kind: ConstraintKind, data: Option<Value>) -> Self {
        Self {
            kind,
            data,
            message: ErrorMessage::Locale,
        }
    }

    /// Replaces the message source.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = message.into();
        self
    }

    /// What kind of rule was violated.
    #[must_use]
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Context for the message, e.g. the limit of a comparison.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The unrendered message source.
    #[must_use]
    pub fn message_source(&self) -> &ErrorMessage {
        &self.message
    }

    /// Renders the message against the current catalog.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.message {
            ErrorMessage::Locale => self.render_catalog(self.kind.as_str()),
            ErrorMessage::Catalog(key) => self.render_catalog(key),
            ErrorMessage::Text(template) => render_template(template, self.data.as_ref()),
            ErrorMessage::Render(render) => render(self),
        }
    }

    fn render_catalog(&self, key: &str) -> String {
        let catalog = locale::locale();
        match catalog.get(key) {
            Some(template) => render_template(template, self.data.as_ref()),
            None => render_template(locale::FALLBACK_MESSAGE, self.data.as_ref()),
        }
    }
}

/// Substitutes `{data}` with the whole context and `{key}` with a field of
/// an object-shaped context. Unknown placeholders are left verbatim.
#[must_use]
pub fn render_template(template: &str, data: Option<&Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match lookup_placeholder(name, data) {
            Some(rendered) => out.push_str(&rendered),
            None => out.push_str(&rest[open..=open + 1 + close]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn lookup_placeholder(name: &str, data: Option<&Value>) -> Option<String> {
    let data = data?;
    if name == "data" {
        return Some(display_value(data));
    }
    data.as_object()?.get(name).map(display_value)
}

/// Displays strings without quotes and everything else as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A path-addressed report of one or more constraint violations.
///
/// Leaf errors have no children. Aggregate errors (`array`, `object`,
/// `one_of`) hold one child per failing member.
///
/// # Examples
///
/// ```
/// use schemata::foundation::{ConstraintKind, ValidationError};
///
/// let error = ValidationError::custom("unique_mv", "mv values must be unique")
///     .with_path("profile.coef_rows");
/// assert_eq!(error.kind(), &ConstraintKind::Custom("unique_mv".into()));
/// assert_eq!(error.message(), "mv values must be unique");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The violated rule.
    pub constraint: Constraint,
    /// Where the violation was reported. Empty at the root.
    pub path: String,
    /// Child failures collected by a composite schema.
    pub errors: Vec<ValidationError>,
    /// The offending value. `None` when the value was missing.
    pub invalid_value: Option<Value>,
}

impl ValidationError {
    /// Creates a leaf error at the root path.
    #[must_use]
    pub fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            path: String::new(),
            errors: Vec::new(),
            invalid_value: None,
        }
    }

    /// Creates a leaf error for a catalog-backed rule.
    #[must_use]
    pub fn of_kind(kind: ConstraintKind, data: Option<Value>) -> Self {
        Self::new(Constraint::new(kind, data))
    }

    /// Creates a user-defined error with a fixed message.
    pub fn custom(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(
            Constraint::new(ConstraintKind::Custom(code.into()), None)
                .with_message(ErrorMessage::Text(message.into())),
        )
    }

    /// Sets the path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the child errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_errors(mut self, errors: Vec<ValidationError>) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the offending value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_invalid_value(mut self, value: Option<Value>) -> Self {
        self.invalid_value = value;
        self
    }

    /// Returns a shallow copy carrying only this error's constraint and
    /// offending value, reported at `path`. Child errors are dropped.
    #[must_use]
    pub fn repath(&self, path: impl Into<String>) -> Self {
        Self {
            constraint: self.constraint.clone(),
            path: path.into(),
            errors: Vec::new(),
            invalid_value: self.invalid_value.clone(),
        }
    }

    /// Returns the constraint kind.
    #[must_use]
    pub fn kind(&self) -> &ConstraintKind {
        &self.constraint.kind
    }

    /// Returns the constraint's contextual data.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.constraint.data.as_ref()
    }

    /// Renders the message against the current catalog.
    #[must_use]
    pub fn message(&self) -> String {
        self.constraint.message()
    }

    /// Returns true if this error has child errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors in the tree, this one included.
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        1 + self
            .errors
            .iter()
            .map(ValidationError::total_error_count)
            .sum::<usize>()
    }

    /// Flattens the tree into a list (depth-first, parent first).
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidationError> {
        let mut result = vec![self];
        for nested in &self.errors {
            result.extend(nested.flatten());
        }
        result
    }

    /// Finds the first error in the tree reported at `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&ValidationError> {
        self.flatten().into_iter().find(|e| e.path == path)
    }

    /// Converts the error tree to JSON, rendering messages now.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "kind": self.constraint.kind.as_str(),
            "message": self.message(),
            "path": self.path,
            "data": self.constraint.data,
            "invalid_value": self.invalid_value,
            "errors": self.errors.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.constraint.kind, self.message())?;
        } else {
            write!(f, "[{}] {}: {}", self.path, self.constraint.kind, self.message())?;
        }

        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, error)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitutes_whole_data() {
        let rendered = render_template("must be <= {data}", Some(&json!(5)));
        assert_eq!(rendered, "must be <= 5");
    }

    #[test]
    fn template_substitutes_object_fields() {
        let data = json!({"expected": ["number"], "actual": "string"});
        let rendered = render_template("expected {expected}, got {actual}", Some(&data));
        assert_eq!(rendered, "expected number, got string");
    }

    #[test]
    fn template_keeps_unknown_placeholders() {
        assert_eq!(render_template("{nope} and {", None), "{nope} and {");
    }

    #[test]
    fn custom_error_uses_fixed_message() {
        let error = ValidationError::custom("unique", "must be unique");
        assert_eq!(error.kind().as_str(), "unique");
        assert_eq!(error.message(), "must be unique");
    }

    #[test]
    fn render_fn_sees_constraint() {
        let constraint = Constraint::new(ConstraintKind::Max, Some(json!(3)))
            .with_message(ErrorMessage::from_fn(|c| format!("{} over", c.kind())));
        assert_eq!(constraint.message(), "max over");
    }

    #[test]
    fn repath_drops_children() {
        let error = ValidationError::of_kind(ConstraintKind::Array, None)
            .with_path("a")
            .with_errors(vec![ValidationError::of_kind(ConstraintKind::Integer, None)])
            .with_invalid_value(Some(json!([1.5])));

        let moved = error.repath("b");
        assert_eq!(moved.path, "b");
        assert_eq!(moved.kind(), &ConstraintKind::Array);
        assert!(!moved.has_nested());
        assert_eq!(moved.invalid_value, Some(json!([1.5])));
    }

    #[test]
    fn flatten_and_count() {
        let error = ValidationError::of_kind(ConstraintKind::Object, None).with_errors(vec![
            ValidationError::of_kind(ConstraintKind::Array, None)
                .with_path("tags")
                .with_errors(vec![
                    ValidationError::of_kind(ConstraintKind::Type, None).with_path("tags[1]"),
                ]),
            ValidationError::of_kind(ConstraintKind::Required, None).with_path("name"),
        ]);

        assert_eq!(error.total_error_count(), 4);
        assert_eq!(error.flatten().len(), 4);
        assert_eq!(
            error.find("tags[1]").map(ValidationError::kind),
            Some(&ConstraintKind::Type)
        );
    }

    #[test]
    fn display_includes_path_and_children() {
        let error = ValidationError::of_kind(ConstraintKind::Object, None)
            .with_errors(vec![ValidationError::custom("x", "bad").with_path("a")]);
        let text = error.to_string();
        assert!(text.starts_with("object: "));
        assert!(text.contains("[a] x: bad"));
    }
}
