//! # schemata
//!
//! Declarative validation of JSON-shaped data with composable schema trees.
//!
//! ## Quick Start
//!
//! ```
//! use schemata::prelude::*;
//! use serde_json::json;
//!
//! let user = mapping()
//!     .field("name", string().trim().min(1).required())
//!     .field("email", string().email())
//!     .field("tags", array().of(string()).max(5));
//!
//! let out = user.validate(json!({"name": " Ada ", "tags": ["math"]})).unwrap();
//! assert_eq!(out["name"], "Ada");
//!
//! let err = user
//!     .validate_with(json!({"email": "nope"}), &ValidateOptions::collect_all())
//!     .unwrap_err();
//! assert_eq!(err.total_error_count(), 3);
//! ```
//!
//! ## Pipeline
//!
//! Every node runs the same steps: missing-field check, null check, type
//! check, transforms, validators. Composites ([`ArraySchema`](schemas::ArraySchema),
//! [`MappingSchema`](schemas::MappingSchema), [`UnionSchema`](schemas::UnionSchema))
//! then descend into their children, failing fast or collecting every child
//! failure depending on [`ValidateOptions::abort_early`](foundation::ValidateOptions).
//!
//! ## Messages
//!
//! Messages are rendered from a process-wide catalog when read; see
//! [`foundation::locale`].

// ValidationError is the error type of every validate call; boxing it would
// add indirection to each failure for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod capabilities;
pub mod foundation;
pub mod json;
mod macros;
pub mod prelude;
pub mod schemas;
