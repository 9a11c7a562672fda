//! Validation of a property derived from the input.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::Finding;
use crate::validator::{Checked, FindingSink, Validator};

/// Finding key reported when a derived property fails its validator.
pub const PROPERTY: &str = "property";

/// Details of a [`PROPERTY`] finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails<P> {
    pub property_name: String,
    pub property_value: P,
    /// What the property validator reported, with paths relative to the property.
    pub property_findings: Vec<Finding>,
}

/// Created with [`has_valid_property`].
pub struct HasValidProperty<I, P, F, V> {
    name: String,
    provider: F,
    validator: V,
    _marker: PhantomData<fn(&I) -> P>,
}

/// Validates a property computed from the input, such as its length.
///
/// `provider` derives the property and `validator` checks it. If the validator
/// reports anything or aborts, one `property` finding is reported for the
/// input, carrying the property's name, its value and the nested findings.
/// The input itself is always returned unchanged.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_valid_property, is_less_or_equal, PropertyDetails};
/// use scrutiny::validate;
///
/// let short = has_valid_property("length", |s: &String| s.chars().count(), is_less_or_equal(3));
///
/// assert!(validate(&"abc".to_string(), &short).is_valid());
///
/// let findings = validate(&"abcd".to_string(), &short).into_findings();
/// let details: PropertyDetails<usize> = findings[0].details_as().unwrap();
/// assert_eq!(details.property_name, "length");
/// assert_eq!(details.property_value, 4);
/// assert_eq!(details.property_findings[0].key, "comparison");
/// ```
pub fn has_valid_property<I, P, F, V>(
    name: impl Into<String>,
    provider: F,
    validator: V,
) -> HasValidProperty<I, P, F, V>
where
    F: Fn(&I) -> P + Send + Sync,
    V: Validator<Input = P>,
{
    HasValidProperty {
        name: name.into(),
        provider,
        validator,
        _marker: PhantomData,
    }
}

impl<I, P, F, V> Validator for HasValidProperty<I, P, F, V>
where
    I: Clone,
    P: Serialize,
    F: Fn(&I) -> P + Send + Sync,
    V: Validator<Input = P>,
{
    type Input = I;
    type Output = I;

    fn validate(&self, input: &I, sink: &mut dyn FindingSink) -> Checked<I> {
        let property = (self.provider)(input);
        let mut nested: Vec<Finding> = Vec::new();
        let aborted = self.validator.validate(&property, &mut nested).is_err();

        if aborted || !nested.is_empty() {
            sink.report(Finding::new(PROPERTY).with_details(PropertyDetails {
                property_name: self.name.clone(),
                property_value: property,
                property_findings: nested,
            }));
        }
        Ok(input.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{is_greater_or_equal, is_less_than};
    use crate::validator::{from_fn, Abort};

    fn length(s: &String) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn test_valid_property() {
        let validator = has_valid_property("length", length, is_greater_or_equal(2.0));
        let mut sink = Vec::new();

        assert_eq!(validator.validate(&"ab".to_string(), &mut sink), Ok("ab".to_string()));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_invalid_property_wraps_findings() {
        let validator = has_valid_property("length", length, is_less_than(2.0));
        let mut sink = Vec::new();

        assert_eq!(validator.validate(&"abc".to_string(), &mut sink), Ok("abc".to_string()));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].key, PROPERTY);

        let details: PropertyDetails<f64> = sink[0].details_as().unwrap();
        assert_eq!(details.property_value, 3.0);
        assert_eq!(details.property_findings.len(), 1);
        assert!(details.property_findings[0].path.is_root());
    }

    #[test]
    fn test_aborting_property_validator_is_soft_for_the_input() {
        let silent = from_fn(|_: &f64, _: &mut dyn FindingSink| -> Checked<f64> { Err(Abort) });
        let validator = has_valid_property("length", length, silent);
        let mut sink = Vec::new();

        assert!(validator.validate(&"x".to_string(), &mut sink).is_ok());
        let details: PropertyDetails<f64> = sink[0].details_as().unwrap();
        assert!(details.property_findings.is_empty());
    }
}
