//! Sequential composition.
//!
//! A [`Chain`] threads one value through a pipeline of validators, each stage
//! reading what the previous stage returned. Stages share the caller's sink.
//!
//! Stages are chained on the value, not on validity: a stage that reported
//! findings but returned a value still feeds the next stage. Only an abort
//! stops the pipeline, and findings reported before it are kept.
//!
//! # Example
//!
//! ```rust
//! use scrutiny::leaf::{has_type_string, is_greater_or_equal, is_less_or_equal, is_valid_integer_string};
//! use scrutiny::{validate, Chain};
//! use serde_json::json;
//!
//! let percentage = Chain::of(has_type_string())
//!     .and(is_valid_integer_string())
//!     .and(is_greater_or_equal(0.0))
//!     .and(is_less_or_equal(100.0));
//!
//! assert_eq!(validate(&json!("42"), &percentage).value().unwrap(), 42.0);
//!
//! // The parse failure does not stop the comparisons from reporting too.
//! assert_eq!(validate(&json!("forty-two"), &percentage).findings().count(), 3);
//!
//! // A wrong type aborts before anything else runs.
//! assert_eq!(validate(&json!(42), &percentage).findings().count(), 1);
//! ```

use super::traits::{Checked, FindingSink, Validator};

/// A pipeline builder and validator.
///
/// `Chain<V>` is itself a [`Validator`] with the input of the first stage and
/// the output of the last one.
#[derive(Debug, Clone)]
pub struct Chain<V> {
    validator: V,
}

impl<V: Validator> Chain<V> {
    /// Starts a pipeline whose first stage is `first`.
    pub fn of(first: V) -> Self {
        Self { validator: first }
    }

    /// Appends `next`, which receives the value returned by the current last stage.
    pub fn and<N>(self, next: N) -> Chain<Then<V, N>>
    where
        N: Validator<Input = V::Output>,
    {
        Chain {
            validator: Then {
                first: self.validator,
                next,
            },
        }
    }

    /// Returns the composed validator.
    pub fn into_validator(self) -> V {
        self.validator
    }
}

impl<V: Validator> Validator for Chain<V> {
    type Input = V::Input;
    type Output = V::Output;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output> {
        self.validator.validate(input, sink)
    }
}

/// Two stages run back to back. Built by [`Chain::and`].
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<A, B> Validator for Then<A, B>
where
    A: Validator,
    B: Validator<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output> {
        let intermediate = self.first.validate(input, sink)?;
        self.next.validate(&intermediate, sink)
    }
}
