//! Error path construction
//!
//! Paths are plain strings built while the engine descends: `user.tags[2]`.
//! The root path is the empty string.

use std::fmt;

/// One step of descent into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// A mapping key.
    Key(&'a str),
    /// A sequence index (or union option index).
    Index(usize),
}

impl<'a> From<&'a str> for PathSegment<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a String> for PathSegment<'a> {
    fn from(key: &'a String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Appends exactly one segment to `parent`.
///
/// ```
/// use schemata::foundation::concat_path;
///
/// assert_eq!(concat_path("", "items"), "items");
/// assert_eq!(concat_path("items", 2), "items[2]");
/// assert_eq!(concat_path("items[2]", "name"), "items[2].name");
/// ```
pub fn concat_path<'a>(parent: &str, segment: impl Into<PathSegment<'a>>) -> String {
    match segment.into() {
        PathSegment::Key(key) if parent.is_empty() => key.to_owned(),
        PathSegment::Key(key) => format!("{parent}.{key}"),
        PathSegment::Index(index) => format!("{parent}[{index}]"),
    }
}
