//! Range conveniences built from the other leaf validators.

use serde_json::Value;

use super::comparison::{is_greater_or_equal, is_less_or_equal, is_less_than};
use super::property::has_valid_property;
use super::typing::{has_type_number, has_type_string};
use crate::validator::{Chain, Validator};

/// Optional bounds. A missing bound does not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interval {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl Interval {
    /// An interval with both bounds.
    pub fn between(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: Some(max_value),
        }
    }

    /// An interval with only a lower bound.
    pub fn at_least(min_value: f64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: None,
        }
    }

    /// An interval with only an upper bound.
    pub fn at_most(max_value: f64) -> Self {
        Self {
            min_value: None,
            max_value: Some(max_value),
        }
    }
}

fn char_count(text: &String) -> f64 {
    text.chars().count() as f64
}

/// A JSON number in `[min_value, max_value)`.
///
/// The lower bound is inclusive and the upper bound exclusive. A non-number
/// aborts with `invalid_type`; a number out of range reports one `comparison`
/// finding per violated bound.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{is_number_between, Interval};
/// use scrutiny::validate;
/// use serde_json::json;
///
/// let age = is_number_between(Interval::between(0.0, 150.0));
///
/// assert!(validate(&json!(0), &age).is_valid());
/// assert!(validate(&json!(150), &age).is_invalid());
/// ```
pub fn is_number_between(interval: Interval) -> impl Validator<Input = Value, Output = f64> {
    let min_value = interval.min_value.unwrap_or(f64::NEG_INFINITY);
    let max_value = interval.max_value.unwrap_or(f64::INFINITY);

    Chain::of(has_type_number())
        .and(is_greater_or_equal(min_value))
        .and(is_less_than(max_value))
}

/// A JSON string whose length in characters is in `[min_value, max_value]`.
///
/// Both bounds are inclusive; a missing lower bound means 0. A length out of
/// range reports a `property` finding named `length` per violated bound.
pub fn is_string_between(interval: Interval) -> impl Validator<Input = Value, Output = String> {
    let min_length = interval.min_value.unwrap_or(0.0);
    let max_length = interval.max_value.unwrap_or(f64::INFINITY);

    Chain::of(has_type_string())
        .and(has_valid_property("length", char_count, is_greater_or_equal(min_length)))
        .and(has_valid_property("length", char_count, is_less_or_equal(max_length)))
}
