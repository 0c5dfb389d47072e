//! Union schema - alternation over candidate schemas
//!
//! Every option is tried, in order, against the value the base pipeline
//! produced. The union fails only when every option fails; otherwise it
//! returns the output of the **last** option that succeeded.
//!
//! ```
//! use schemata::prelude::*;
//! use serde_json::json;
//!
//! let id = union()
//!     .option(number().integer())
//!     .option(string().transform(|v| json!(format!("id:{}", v.as_str().unwrap_or_default()))));
//!
//! assert_eq!(id.validate(json!(7)).unwrap(), json!(7));
//! assert_eq!(id.validate(json!("x")).unwrap(), json!("id:x"));
//! assert_eq!(id.validate(json!(true)).unwrap_err().kind(), &ConstraintKind::OneOf);
//! ```

use serde_json::Value;

use super::aggregate;
use crate::capabilities::EqualityComparable;
use crate::foundation::{
    ConstraintKind, Schema, SchemaBuilder, SchemaCore, SchemaRef, Slot, TypeSet, ValidationError,
    concat_path,
};

/// Accepts a value when at least one option accepts it.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    core: SchemaCore,
    options: Vec<SchemaRef>,
}

impl UnionSchema {
    /// Creates an optional, non-nullable union without options.
    ///
    /// A union without options rejects every present value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SchemaCore::new(TypeSet::any()),
            options: Vec::new(),
        }
    }

    /// Replaces the options.
    pub fn one_of(mut self, options: impl IntoIterator<Item = SchemaRef>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Appends one option.
    pub fn option(mut self, option: impl Into<SchemaRef>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Returns the options in the order they are tried.
    #[must_use]
    pub fn options(&self) -> &[SchemaRef] {
        &self.options
    }
}

impl Default for UnionSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder for UnionSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SchemaCore {
        &mut self.core
    }
}

impl EqualityComparable for UnionSchema {}

impl Schema for UnionSchema {
    fn validate_at(
        &self,
        slot: Slot,
        abort_early: bool,
        path: &str,
    ) -> Result<Slot, ValidationError> {
        let value = match self.core.run(slot, path)? {
            Slot::Present(Value::Null) => return Ok(Slot::Present(Value::Null)),
            Slot::Missing => return Ok(Slot::Missing),
            Slot::Present(value) => value,
        };

        let mut matching = None;
        let mut errors = Vec::new();

        for (index, option) in self.options.iter().enumerate() {
            let option_path = concat_path(path, index);
            match option.validate_at(Slot::Present(value.clone()), abort_early, &option_path) {
                Ok(output) => matching = Some(output),
                Err(error) => errors.push(error),
            }
        }

        match matching {
            Some(output) if errors.len() < self.options.len() => Ok(output),
            _ => Err(aggregate(ConstraintKind::OneOf, path, errors, value)),
        }
    }
}
