//! String schema

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::capabilities::{Comparable, EqualityComparable, Measurable};
use crate::foundation::{
    Constraint, ConstraintKind, Rule, Schema, SchemaBuilder, SchemaCore, Slot, TypeSet,
    ValidationError, ValueType,
};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}|00000000-0000-0000-0000-000000000000)$",
    )
    .expect("uuid pattern is valid")
});

const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Validates strings.
///
/// Sizes count Unicode scalar values; ordering is lexicographic.
///
/// # Examples
///
/// ```
/// use schemata::prelude::*;
/// use serde_json::json;
///
/// let name = string().min(1).max(50).required();
/// assert_eq!(name.validate(json!("Ada")).unwrap(), json!("Ada"));
/// assert!(name.validate(json!("")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StringSchema {
    core: SchemaCore,
}

impl StringSchema {
    /// Creates an optional, non-nullable string schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SchemaCore::new(TypeSet::single(ValueType::String)),
        }
    }

    /// Requires a match of `regex` at the start of the string.
    pub fn matches(self, regex: Regex) -> Self {
        self.push_pattern(regex, false)
    }

    /// Like [`matches`](Self::matches), but lets the empty string through.
    pub fn matches_or_empty(self, regex: Regex) -> Self {
        self.push_pattern(regex, true)
    }

    /// Requires an email address.
    pub fn email(self) -> Self {
        self.push_str_check(ConstraintKind::Email, |s| EMAIL.is_match(s))
    }

    /// Requires an absolute `http`, `https` or `ftp` URL with a host.
    pub fn url(self) -> Self {
        self.push_str_check(ConstraintKind::Url, |s| {
            url::Url::parse(s).is_ok_and(|u| URL_SCHEMES.contains(&u.scheme()) && u.has_host())
        })
    }

    /// Requires a hyphenated UUID (versions 1-5, or the nil UUID).
    pub fn uuid(self) -> Self {
        self.push_str_check(ConstraintKind::Uuid, |s| UUID.is_match(s))
    }

    /// Requires the string to equal its lowercase form.
    pub fn lowercase(self) -> Self {
        self.push_str_check(ConstraintKind::Lowercase, |s| s.to_lowercase() == s)
    }

    /// Requires the string to equal its uppercase form.
    pub fn uppercase(self) -> Self {
        self.push_str_check(ConstraintKind::Uppercase, |s| s.to_uppercase() == s)
    }

    /// Trims surrounding whitespace before the validators run.
    pub fn trim(self) -> Self {
        self.transform(|value| match value {
            Value::String(s) => Value::String(s.trim().to_owned()),
            other => other,
        })
    }

    fn push_pattern(mut self, regex: Regex, allow_empty: bool) -> Self {
        let constraint =
            Constraint::new(ConstraintKind::Matches, Some(Value::from(regex.as_str())));
        self.core.push_rule(Rule::predicate(constraint, move |value| {
            value.as_str().is_some_and(|s| {
                (allow_empty && s.is_empty()) || regex.find(s).is_some_and(|m| m.start() == 0)
            })
        }));
        self
    }

    fn push_str_check(mut self, kind: ConstraintKind, accept: fn(&str) -> bool) -> Self {
        self.core.push_rule(Rule::predicate(Constraint::new(kind, None), move |value| {
            value.as_str().is_some_and(accept)
        }));
        self
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for StringSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl Measurable for StringSchema {}
impl Comparable for StringSchema {}
impl EqualityComparable for StringSchema {}

impl Schema for StringSchema {
    fn validate_at(
        &self,
        slot: Slot,
        _abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        self.core.run(slot, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::string;
    use rstest::rstest;
    use serde_json::json;

    fn kind_of(schema: &StringSchema, value: Value) -> Option<ConstraintKind> {
        schema.validate(value).err().map(|e| e.kind().clone())
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("not-an-email", false)]
    #[case("a@", false)]
    fn email_format(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(string().email().validate(json!(input)).is_ok(), ok);
    }

    #[rstest]
    #[case("https://example.com/path?q=1", true)]
    #[case("ftp://files.example.com", true)]
    #[case("mailto:someone@example.com", false)]
    #[case("example.com", false)]
    fn url_format(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(string().url().validate(json!(input)).is_ok(), ok);
    }

    #[rstest]
    #[case("123e4567-e89b-12d3-a456-426614174000", true)]
    #[case("00000000-0000-0000-0000-000000000000", true)]
    #[case("123e4567-e89b-62d3-a456-426614174000", false)]
    #[case("123e4567e89b12d3a456426614174000", false)]
    fn uuid_format(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(string().uuid().validate(json!(input)).is_ok(), ok);
    }

    #[test]
    fn matches_anchors_at_start_only() {
        let schema = string().matches(Regex::new("ab+").unwrap());
        assert!(schema.validate(json!("abbbc")).is_ok());
        assert_eq!(kind_of(&schema, json!("cab")), Some(ConstraintKind::Matches));
        assert_eq!(kind_of(&schema, json!("")), Some(ConstraintKind::Matches));
    }

    #[test]
    fn matches_or_empty_skips_empty_string() {
        let schema = string().matches_or_empty(Regex::new("^[0-9]+$").unwrap());
        assert!(schema.validate(json!("")).is_ok());
        assert!(schema.validate(json!("x")).is_err());
    }

    #[test]
    fn case_checks() {
        assert!(string().lowercase().validate(json!("abc-1")).is_ok());
        assert_eq!(
            kind_of(&string().lowercase(), json!("aBc")),
            Some(ConstraintKind::Lowercase)
        );
        assert_eq!(
            kind_of(&string().uppercase(), json!("ABc")),
            Some(ConstraintKind::Uppercase)
        );
    }

    #[test]
    fn size_and_order_mixins() {
        let schema = string().min(2).max(3).ge("b");
        assert!(schema.validate(json!("bc")).is_ok());
        assert_eq!(kind_of(&schema, json!("b")), Some(ConstraintKind::Min));
        assert_eq!(kind_of(&schema, json!("bcde")), Some(ConstraintKind::Max));
        assert_eq!(kind_of(&schema, json!("ab")), Some(ConstraintKind::Ge));
        assert_eq!(kind_of(&string().length(2), json!("abc")), Some(ConstraintKind::Length));
    }

    #[test]
    fn trim_runs_before_validators() {
        let schema = string().trim().min(3);
        assert_eq!(schema.validate(json!("  abc  ")).unwrap(), json!("abc"));
        assert!(schema.validate(json!("  ab  ")).is_err());
    }

    #[test]
    fn rejects_numbers() {
        assert_eq!(kind_of(&string(), json!(5)), Some(ConstraintKind::Type));
    }
}
