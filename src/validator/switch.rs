//! Alternative composition.
//!
//! A [`Switch`] tries mutually exclusive alternatives in declaration order
//! against the same input. Each alternative is judged strictly: reporting
//! anything counts as a failure even if a value was returned. The first
//! alternative that returns a value without reporting wins, and nothing any
//! alternative reported is passed on.
//!
//! When every alternative fails, the findings of all alternatives are
//! forwarded in declaration order and the switch aborts.
//!
//! # Example
//!
//! ```rust
//! use scrutiny::leaf::{has_type_string, is_null, is_valid_uuid};
//! use scrutiny::{validate, Chain, Switch, ValidatorExt};
//! use serde_json::json;
//!
//! let id = Switch::of(is_null().map(|()| None))
//!     .or(Chain::of(has_type_string()).and(is_valid_uuid()).map(Some));
//!
//! assert_eq!(validate(&json!(null), &id).value().unwrap(), None);
//!
//! // Both alternatives failed, so both explain why.
//! let findings = validate(&json!("not-a-uuid"), &id).into_findings();
//! assert_eq!(findings[0].key, "constant");
//! assert_eq!(findings[1].key, "invalid_string");
//! ```

use serde_json::Value;
use tracing::trace;

use super::traits::{Abort, BoxValidator, Checked, FindingSink, Validator, ValidatorExt};
use crate::error::Finding;
use crate::leaf::is_null;

/// A set of alternatives from `I` to `O`, tried in order.
///
/// All alternatives must produce the same output type; wrap outputs with
/// [`ValidatorExt::map`] (for example into an enum or `Option`) to unify them.
pub struct Switch<I, O> {
    alternatives: Vec<BoxValidator<I, O>>,
}

impl<I: 'static, O: 'static> Switch<I, O> {
    /// Starts a switch whose first alternative is `first`.
    pub fn of<V>(first: V) -> Self
    where
        V: Validator<Input = I, Output = O> + 'static,
    {
        Self {
            alternatives: vec![Box::new(first)],
        }
    }

    /// Appends an alternative, tried only if all earlier ones failed.
    pub fn or<V>(mut self, alternative: V) -> Self
    where
        V: Validator<Input = I, Output = O> + 'static,
    {
        self.alternatives.push(Box::new(alternative));
        self
    }

    /// Returns the number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Always false; a switch is created with one alternative.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// Runs one alternative strictly, buffering what it reports.
///
/// Returns the value only if the alternative returned one and reported nothing.
fn attempt<I, O>(
    alternative: &BoxValidator<I, O>,
    input: &I,
    failures: &mut Vec<Finding>,
) -> Option<O> {
    let mut reported: Vec<Finding> = Vec::new();
    match alternative.validate(input, &mut reported) {
        Ok(value) if reported.is_empty() => Some(value),
        _ => {
            failures.append(&mut reported);
            None
        }
    }
}

impl<I, O> Validator for Switch<I, O> {
    type Input = I;
    type Output = O;

    fn validate(&self, input: &I, sink: &mut dyn FindingSink) -> Checked<O> {
        let mut failures: Vec<Finding> = Vec::new();

        for (index, alternative) in self.alternatives.iter().enumerate() {
            if let Some(value) = attempt(alternative, input, &mut failures) {
                trace!(alternative = index, "switch alternative matched");
                return Ok(value);
            }
        }

        trace!(
            alternatives = self.alternatives.len(),
            "no switch alternative matched"
        );
        for finding in failures {
            sink.report(finding);
        }
        Err(Abort)
    }
}

/// Accepts either `null` or whatever `validator` accepts.
///
/// `null` yields `None`; anything else is handed to `validator` and its value
/// is wrapped in `Some`. If neither applies, the findings of both are reported.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::has_type_string;
/// use scrutiny::{validate, value_or_null};
/// use serde_json::json;
///
/// let nickname = value_or_null(has_type_string());
///
/// assert_eq!(validate(&json!(null), &nickname).value().unwrap(), None);
/// assert_eq!(validate(&json!("bob"), &nickname).value().unwrap(), Some("bob".to_string()));
/// assert!(validate(&json!(3), &nickname).is_invalid());
/// ```
pub fn value_or_null<V>(validator: V) -> Switch<Value, Option<V::Output>>
where
    V: Validator<Input = Value> + 'static,
    V::Output: 'static,
{
    Switch::of(validator.map(Some)).or(is_null().map(|()| None))
}
