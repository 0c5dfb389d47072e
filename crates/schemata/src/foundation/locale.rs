//! Process-wide message catalog
//!
//! Maps constraint kinds to message templates. The catalog starts out with
//! the built-in English defaults and can be overridden entry by entry with
//! [`set_locale`] or replaced wholesale with [`replace_locale`]. Reads are
//! lock-free snapshots; errors render their messages against whatever catalog
//! is current at the time the message is read.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Used when neither the constraint nor the catalog provides a message.
pub const FALLBACK_MESSAGE: &str = "Invalid value";

const DEFAULTS: &[(&str, &str)] = &[
    ("required", "Field is required"),
    ("not_nullable", "Field cannot be null"),
    ("type", "Value should be of type {expected}, got {actual}"),
    ("array", "Invalid array"),
    ("object", "Invalid object"),
    ("one_of", "Value does not match any of the allowed options"),
    ("le", "Value must be less than or equal to {data}"),
    ("ge", "Value must be greater than or equal to {data}"),
    ("lt", "Value must be less than {data}"),
    ("gt", "Value must be greater than {data}"),
    ("positive", "Value must be positive"),
    ("negative", "Value must be negative"),
    ("eq", "Value must be equal to {data}"),
    ("ne", "Value must not be equal to {data}"),
    ("length", "Length must be {data}"),
    ("min", "Length must be at least {data}"),
    ("max", "Length must be at most {data}"),
    ("matches", "Value must match the pattern {data}"),
    ("email", "Value must be a valid email"),
    ("url", "Value must be a valid URL"),
    ("uuid", "Value must be a valid UUID"),
    ("lowercase", "Value must be a lowercase string"),
    ("uppercase", "Value must be an uppercase string"),
    ("integer", "Value must be an integer"),
    ("multiple_of", "Value must be a multiple of {data}"),
    ("strict", "Object contains unknown keys: {data}"),
    ("json", "Value must be valid JSON: {data}"),
];

static CATALOG: LazyLock<ArcSwap<Locale>> =
    LazyLock::new(|| ArcSwap::from_pointee(Locale::defaults()));

// ============================================================================
// LOCALE
// ============================================================================

/// A mapping from constraint kind to message template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale {
    entries: IndexMap<String, String>,
}

impl Locale {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in defaults.
    #[must_use]
    pub fn defaults() -> Self {
        DEFAULTS.iter().copied().collect()
    }

    /// Loads entries from a JSON object of `"kind": "template"` pairs.
    pub fn from_json_str(text: &str) -> Result<Self, LocaleError> {
        serde_json::from_str(text).map_err(LocaleError::Parse)
    }

    /// Returns the template for `kind`.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).map(String::as_str)
    }

    /// Inserts or replaces one entry.
    pub fn insert(&mut self, kind: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(kind.into(), template.into());
    }

    /// Overlays `other` onto this catalog.
    pub fn merge(&mut self, other: Locale) {
        self.entries.extend(other.entries);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(kind, template)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Locale
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// The catalog text was not a JSON object of strings.
    #[error("invalid message catalog: {0}")]
    Parse(#[source] serde_json::Error),
}

// ============================================================================
// GLOBAL CATALOG
// ============================================================================

/// Returns a snapshot of the current catalog.
#[inline]
pub fn locale() -> Arc<Locale> {
    CATALOG.load_full()
}

/// Overrides individual entries, keeping the rest.
pub fn set_locale<K, V>(entries: impl IntoIterator<Item = (K, V)>)
where
    K: Into<String>,
    V: Into<String>,
{
    let overrides: Locale = entries.into_iter().collect();
    let count = overrides.len();
    CATALOG.rcu(|current| {
        let mut next = Locale::clone(current);
        next.merge(overrides.clone());
        next
    });
    tracing::debug!(entries = count, "message catalog entries overridden");
}

/// Replaces the whole catalog.
pub fn replace_locale(locale: Locale) {
    let count = locale.len();
    CATALOG.store(Arc::new(locale));
    tracing::debug!(entries = count, "message catalog replaced");
}

/// Restores the built-in defaults.
pub fn reset_locale() {
    CATALOG.store(Arc::new(Locale::defaults()));
    tracing::debug!("message catalog reset to defaults");
}
