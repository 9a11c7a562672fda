//! The validation entry point.
//!
//! [`validate`] runs a validator against an input with a fresh findings
//! collector and folds the result into an [`Outcome`]: valid when the root
//! validator returned a value and nothing was reported, invalid otherwise.

use std::fmt;

use stillwater::Validation;
use tracing::{debug, warn};

use crate::error::{Finding, Findings, ValidationFailed};
use crate::validator::{Abort, Validator};
use crate::ValidationResult;

/// Finding key synthesized when the root validator aborts without reporting.
///
/// A well-behaved validator always reports before aborting. When one does not,
/// the outcome still carries this finding so an invalid outcome is never
/// without diagnostics.
pub const UNSPECIFIED_FAILURE: &str = "unspecified_failure";

/// The result of running a validator through [`validate`].
///
/// Exactly one of:
/// - valid, holding the produced value;
/// - invalid, holding at least one finding in reporting order.
///
/// # Example
///
/// ```rust
/// use scrutiny::{leaf, validate};
/// use serde_json::json;
///
/// let outcome = validate(&json!("hello"), &leaf::has_type_string());
/// assert!(outcome.is_valid());
/// assert_eq!(outcome.value().unwrap(), "hello");
///
/// let outcome = validate(&json!(7), &leaf::has_type_string());
/// assert_eq!(outcome.findings().count(), 1);
/// assert!(outcome.value().is_err());
/// ```
pub struct Outcome<R> {
    result: ValidationResult<R>,
}

impl<R> Outcome<R> {
    /// Returns true if no finding was reported and the validator produced a value.
    pub fn is_valid(&self) -> bool {
        self.result.is_success()
    }

    /// Returns true if at least one finding was reported or the validator aborted.
    pub fn is_invalid(&self) -> bool {
        self.result.is_failure()
    }

    /// Returns the validated value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailed`] if the outcome is invalid. The error holds
    /// no details; read [`findings`](Self::findings) for those.
    pub fn value(self) -> Result<R, ValidationFailed> {
        match self.result {
            Validation::Success(value) => Ok(value),
            Validation::Failure(_) => Err(ValidationFailed),
        }
    }

    /// Returns the reported findings in order. Empty iff the outcome is valid.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.invalid_findings().into_iter().flat_map(|findings| findings.iter())
    }

    /// Returns the non-empty findings of an invalid outcome.
    pub fn invalid_findings(&self) -> Option<&Findings> {
        match &self.result {
            Validation::Success(_) => None,
            Validation::Failure(findings) => Some(findings),
        }
    }

    /// Consumes the outcome and returns its findings. Empty iff the outcome is valid.
    pub fn into_findings(self) -> Vec<Finding> {
        match self.result {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(findings) => findings.into_vec(),
        }
    }

    /// Converts into a stillwater `Validation` for applicative composition.
    pub fn into_validation(self) -> ValidationResult<R> {
        self.result
    }
}

impl<R> From<ValidationResult<R>> for Outcome<R> {
    fn from(result: ValidationResult<R>) -> Self {
        Self { result }
    }
}

impl<R: fmt::Debug> fmt::Debug for Outcome<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Validation::Success(value) => f.debug_tuple("Valid").field(value).finish(),
            Validation::Failure(findings) => f.debug_tuple("Invalid").field(findings).finish(),
        }
    }
}

/// Runs `validator` against `input`.
///
/// All findings reported during the run are collected in order. The outcome is
/// valid iff the validator returned normally and reported nothing.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_type_number, is_greater_or_equal};
/// use scrutiny::{validate, Chain};
/// use serde_json::json;
///
/// let adult = Chain::of(has_type_number()).and(is_greater_or_equal(18.0));
///
/// assert_eq!(validate(&json!(42), &adult).value().unwrap(), 42.0);
///
/// let findings = validate(&json!(12), &adult).into_findings();
/// assert_eq!(findings[0].key, "comparison");
/// ```
pub fn validate<V>(input: &V::Input, validator: &V) -> Outcome<V::Output>
where
    V: Validator + ?Sized,
{
    let mut collected: Vec<Finding> = Vec::new();
    let returned = validator.validate(input, &mut collected);

    let result = match (returned, Findings::from_vec(collected)) {
        (Ok(value), None) => Validation::Success(value),
        (returned, Some(findings)) => {
            debug!(
                findings = findings.len(),
                aborted = returned.is_err(),
                "validation produced findings"
            );
            Validation::Failure(findings)
        }
        (Err(Abort), None) => {
            warn!("validator aborted without reporting a finding");
            Validation::Failure(Findings::single(Finding::new(UNSPECIFIED_FAILURE)))
        }
    };

    Outcome { result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{from_fn, Checked, FindingSink};

    #[test]
    fn test_valid_when_nothing_reported() {
        let validator = from_fn(|n: &i32, _: &mut dyn FindingSink| Ok(n + 1));
        let outcome = validate(&1, &validator);

        assert!(outcome.is_valid());
        assert_eq!(outcome.findings().count(), 0);
        assert_eq!(outcome.value(), Ok(2));
    }

    #[test]
    fn test_soft_failure_is_invalid() {
        let validator = from_fn(|n: &i32, sink: &mut dyn FindingSink| {
            sink.report(Finding::new("soft"));
            Ok(*n)
        });
        let outcome = validate(&1, &validator);

        assert!(outcome.is_invalid());
        assert_eq!(outcome.into_findings()[0].key, "soft");
    }

    #[test]
    fn test_abort_keeps_reported_findings() {
        let validator = from_fn(|_: &i32, sink: &mut dyn FindingSink| -> Checked<i32> {
            sink.report(Finding::new("first"));
            sink.report(Finding::new("second"));
            Err(Abort)
        });
        let findings = validate(&1, &validator).into_findings();

        let keys: Vec<_> = findings.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second"]);
    }

    #[test]
    fn test_silent_abort_synthesizes_finding() {
        let validator = from_fn(|_: &i32, _: &mut dyn FindingSink| -> Checked<i32> { Err(Abort) });
        let outcome = validate(&1, &validator);

        assert!(outcome.is_invalid());
        let findings = outcome.into_findings();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, UNSPECIFIED_FAILURE);
        assert!(findings[0].path.is_root());
    }

    #[test]
    fn test_value_of_invalid_outcome_fails() {
        let validator = from_fn(|_: &i32, sink: &mut dyn FindingSink| {
            sink.report(Finding::new("soft"));
            Ok(0)
        });
        assert_eq!(validate(&1, &validator).value(), Err(ValidationFailed));
    }

    #[test]
    fn test_into_validation() {
        let validator = from_fn(|n: &i32, _: &mut dyn FindingSink| Ok(*n));
        assert!(validate(&5, &validator).into_validation().is_success());
    }
}
