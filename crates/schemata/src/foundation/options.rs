//! Per-call validation options

use serde::{Deserialize, Serialize};

/// Controls one call to [`Schema::validate_with`](super::Schema::validate_with).
///
/// Deserializable so callers can keep validation settings next to the rest
/// of their configuration; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Stop at the first failing child (`true`) or collect every failure.
    pub abort_early: bool,
    /// Path of the validated value, prefixed to every reported path.
    pub path: String,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            abort_early: true,
            path: String::new(),
        }
    }
}

impl ValidateOptions {
    /// Fail-fast options at the root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that collect every failure.
    #[must_use]
    pub fn collect_all() -> Self {
        Self {
            abort_early: false,
            ..Self::default()
        }
    }

    /// Sets the fail-fast flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    /// Sets the root path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fail_fast_at_root() {
        let options = ValidateOptions::default();
        assert!(options.abort_early);
        assert!(options.path.is_empty());
    }

    #[test]
    fn deserializes_partial_config() {
        let options: ValidateOptions = serde_json::from_str(r#"{"abort_early": false}"#).unwrap();
        assert_eq!(options, ValidateOptions::collect_all());
    }
}
