//! # Scrutiny
//!
//! Composable validators that turn untyped JSON into typed values while
//! reporting every problem found along the way.
//!
//! ## Overview
//!
//! A validator reads an input and either returns a value or aborts. Along the
//! way it reports [`Finding`]s, each with a key, a path into the input and
//! kind-specific details. Reporting and aborting are independent: a soft
//! failure reports but still hands a value on, so later stages keep checking
//! and the caller gets the full picture in one run.
//!
//! Larger validators are built from smaller ones with four combinators:
//!
//! - [`Chain`]: sequential stages, each reading the previous value
//! - [`Switch`]: alternatives tried in order
//! - [`Composite`]: a typed record built field by field from an object
//! - [`array_of`]: the same validator applied to every element
//!
//! [`validate`] runs a validator with a fresh collector and returns an
//! [`Outcome`]: valid with the produced value, or invalid with at least one
//! finding.
//!
//! ## Example
//!
//! ```rust
//! use scrutiny::leaf::{has_type_array, has_type_object, has_type_string, is_number_between, Interval};
//! use scrutiny::{array_of, validate, Chain, Composite};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Team {
//!     name: String,
//!     scores: Vec<f64>,
//! }
//!
//! let team = Chain::of(has_type_object()).and(
//!     Composite::<Team>::of()
//!         .add("name", has_type_string())
//!         .add(
//!             "scores",
//!             Chain::of(has_type_array())
//!                 .and(array_of(is_number_between(Interval::between(0.0, 10.0)))),
//!         ),
//! );
//!
//! let outcome = validate(&json!({"name": "owls", "scores": [3, 7]}), &team);
//! assert_eq!(outcome.value().unwrap().scores, vec![3.0, 7.0]);
//!
//! // Every problem is reported, each at its own location.
//! let outcome = validate(&json!({"name": 1, "scores": [3, 12, "x"]}), &team);
//! let paths: Vec<_> = outcome.findings().map(|f| f.path.to_string()).collect();
//! assert_eq!(paths, vec!["name", "scores[1]", "scores[2]"]);
//! ```

pub mod error;
pub mod leaf;
pub mod path;
pub mod registry;
pub mod validation;
pub mod validator;

pub use error::{Finding, Findings, ValidationFailed};
pub use path::{JsonPath, PathSegment};
pub use registry::{Reference, RegistryError, ValidatorRegistry};
pub use validation::{validate, Outcome, UNSPECIFIED_FAILURE};
pub use validator::{
    array_of, from_fn, value_or_null, Abort, BoxValidator, Chain, Checked, Composite, Exact,
    FindingSink, Scoped, Switch, Validator, ValidatorExt,
};

/// Type alias for validation results using Findings
pub type ValidationResult<T> = stillwater::Validation<T, Findings>;
