//! The validator contract.
//!
//! Every validator, leaf or combinator, implements [`Validator`]: it reads an
//! input, reports zero or more [`Finding`]s through a [`FindingSink`], and then
//! either returns a value or [`Abort`]s.
//!
//! Two outcomes are easy to confuse and must be kept apart:
//! - **soft failure**: the validator reported findings but still returned a
//!   usable value, so later stages keep running on it;
//! - **hard failure**: the validator returned `Err(Abort)` because no sensible
//!   value exists (wrong primitive type, unparseable text).
//!
//! Reporting does not imply aborting and aborting does not imply that anything
//! was reported. Combinators never infer one from the other.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::Finding;
use crate::path::PathSegment;

/// Marker returned by a validator that cannot produce a usable value.
///
/// It carries no payload. The findings explaining why must already have been
/// reported through the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, thiserror::Error)]
#[error("validator aborted without a usable value")]
pub struct Abort;

/// Result of a single validator invocation.
pub type Checked<T> = Result<T, Abort>;

/// Destination for findings reported during one validation run.
///
/// The entry point owns the root sink. Combinators hand nested validators
/// either the same sink or a wrapper that rewrites findings on the way
/// through (see [`Scoped`]).
pub trait FindingSink {
    /// Records one finding. Order of calls is the order consumers observe.
    fn report(&mut self, finding: Finding);
}

impl FindingSink for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}

/// A sink that prepends one path segment to every finding before forwarding it.
///
/// Composites scope each field by its key and arrays scope each element by
/// its index, so nested paths are built outer-to-inner without any sibling
/// ever seeing another's segment.
pub struct Scoped<'a> {
    parent: &'a mut dyn FindingSink,
    segment: PathSegment,
}

impl<'a> Scoped<'a> {
    /// Wraps `parent` so findings arrive with `segment` in front of their path.
    pub fn new(parent: &'a mut dyn FindingSink, segment: PathSegment) -> Self {
        Self { parent, segment }
    }
}

impl FindingSink for Scoped<'_> {
    fn report(&mut self, finding: Finding) {
        self.parent.report(finding.prefixed(self.segment.clone()));
    }
}

/// A composable validation step.
///
/// A validator is built once and then invoked any number of times; it keeps no
/// state between invocations. All per-run state lives in the sink.
///
/// Implementations must:
/// - report at least one finding whenever the input is invalid, before
///   returning or aborting;
/// - never report after returning;
/// - never mutate the input (it is only ever borrowed).
///
/// The `Send + Sync` bounds allow a composed schema to be shared across threads
/// and stored as `Box<dyn Validator<..>>`.
///
/// # Example
///
/// ```rust
/// use scrutiny::{validate, Checked, Finding, FindingSink, Validator};
///
/// struct IsOdd;
///
/// impl Validator for IsOdd {
///     type Input = i64;
///     type Output = i64;
///
///     fn validate(&self, input: &i64, sink: &mut dyn FindingSink) -> Checked<i64> {
///         if input % 2 == 0 {
///             sink.report(Finding::new("not_odd").with_details(input));
///         }
///         // Returned even when invalid so later stages can inspect it.
///         Ok(*input)
///     }
/// }
///
/// assert!(validate(&3, &IsOdd).is_valid());
/// assert_eq!(validate(&4, &IsOdd).into_findings()[0].key, "not_odd");
/// ```
pub trait Validator: Send + Sync {
    /// The type this validator reads.
    type Input: ?Sized;

    /// The type produced when the validator does not abort.
    type Output;

    /// Validates `input`, reporting findings through `sink`.
    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output>;
}

/// A boxed validator from `I` to `O`.
pub type BoxValidator<I, O> = Box<dyn Validator<Input = I, Output = O>>;

impl<V: Validator + ?Sized> Validator for &V {
    type Input = V::Input;
    type Output = V::Output;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output> {
        (**self).validate(input, sink)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    type Input = V::Input;
    type Output = V::Output;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output> {
        (**self).validate(input, sink)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    type Input = V::Input;
    type Output = V::Output;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output> {
        (**self).validate(input, sink)
    }
}

/// A validator backed by a function.
///
/// Created with [`from_fn`].
pub struct FromFn<I: ?Sized, O, F> {
    f: F,
    _marker: PhantomData<fn(&I) -> O>,
}

/// Turns a function or closure into a [`Validator`].
///
/// # Example
///
/// ```rust
/// use scrutiny::{from_fn, validate, Abort, Finding, FindingSink};
///
/// let non_empty = from_fn(|s: &String, sink: &mut dyn FindingSink| {
///     if s.is_empty() {
///         sink.report(Finding::new("empty"));
///         return Err(Abort);
///     }
///     Ok(s.clone())
/// });
///
/// assert!(validate(&"x".to_string(), &non_empty).is_valid());
/// assert!(validate(&String::new(), &non_empty).is_invalid());
/// ```
pub fn from_fn<I, O, F>(f: F) -> FromFn<I, O, F>
where
    I: ?Sized,
    F: Fn(&I, &mut dyn FindingSink) -> Checked<O> + Send + Sync,
{
    FromFn {
        f,
        _marker: PhantomData,
    }
}

impl<I, O, F> Validator for FromFn<I, O, F>
where
    I: ?Sized,
    F: Fn(&I, &mut dyn FindingSink) -> Checked<O> + Send + Sync,
{
    type Input = I;
    type Output = O;

    fn validate(&self, input: &I, sink: &mut dyn FindingSink) -> Checked<O> {
        (self.f)(input, sink)
    }
}

/// Transforms the output of a validator. Created with [`ValidatorExt::map`].
pub struct MapOutput<V, F, R> {
    inner: V,
    f: F,
    _marker: PhantomData<fn() -> R>,
}

impl<V, F, R> Validator for MapOutput<V, F, R>
where
    V: Validator,
    F: Fn(V::Output) -> R + Send + Sync,
{
    type Input = V::Input;
    type Output = R;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<R> {
        self.inner.validate(input, sink).map(&self.f)
    }
}

/// Finding key reported when an output cannot be represented as JSON.
pub const UNSERIALIZABLE_OUTPUT: &str = "unserializable_output";

/// Erases the output of a validator to `serde_json::Value`.
///
/// Created with [`ValidatorExt::to_json`]. This is what lets validators with
/// different output types sit side by side in a composite or a registry.
pub struct ToJson<V> {
    inner: V,
}

impl<V> Validator for ToJson<V>
where
    V: Validator,
    V::Output: Serialize,
{
    type Input = V::Input;
    type Output = Value;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Value> {
        let output = self.inner.validate(input, sink)?;
        serde_json::to_value(output).map_err(|err| {
            sink.report(
                Finding::new(UNSERIALIZABLE_OUTPUT)
                    .with_details(serde_json::json!({ "error": err.to_string() })),
            );
            Abort
        })
    }
}

/// Extension methods available on every validator.
pub trait ValidatorExt: Validator + Sized {
    /// Maps the output of this validator with `f`.
    ///
    /// Findings and aborts pass through unchanged.
    fn map<F, R>(self, f: F) -> MapOutput<Self, F, R>
    where
        F: Fn(Self::Output) -> R + Send + Sync,
    {
        MapOutput {
            inner: self,
            f,
            _marker: PhantomData,
        }
    }

    /// Converts the output of this validator to a JSON value.
    fn to_json(self) -> ToJson<Self>
    where
        Self::Output: Serialize,
    {
        ToJson { inner: self }
    }

    /// Boxes this validator behind a trait object.
    fn boxed(self) -> BoxValidator<Self::Input, Self::Output>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<V: Validator> ValidatorExt for V {}
