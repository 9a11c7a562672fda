//! Comparison validators.
//!
//! Each validator compares its input with a fixed operand. A failed comparison
//! is soft: one `comparison` finding is reported and the input is returned
//! unchanged, so a chain of bounds reports every bound that is violated.
//!
//! Comparisons use `PartialOrd`, so `NaN` fails every comparison except
//! [`is_not_equal_to`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Finding;
use crate::validator::{Checked, FindingSink, Validator};

/// Finding key reported when a comparison does not hold.
pub const COMPARISON: &str = "comparison";

/// The relation a [`Comparison`] checks, written `input <op> operand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl Comparator {
    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::Less => "<",
            Comparator::LessOrEqual => "<=",
            Comparator::Greater => ">",
            Comparator::GreaterOrEqual => ">=",
        }
    }

    /// Returns true if `lhs <op> rhs` holds.
    pub fn holds<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Comparator::Equal => lhs == rhs,
            Comparator::NotEqual => lhs != rhs,
            Comparator::Less => lhs < rhs,
            Comparator::LessOrEqual => lhs <= rhs,
            Comparator::Greater => lhs > rhs,
            Comparator::GreaterOrEqual => lhs >= rhs,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Details of a [`COMPARISON`] finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDetails<T> {
    pub comparator: Comparator,
    pub compared_value: T,
}

/// Compares the input with a fixed operand.
#[derive(Debug, Clone)]
pub struct Comparison<T> {
    comparator: Comparator,
    operand: T,
}

impl<T> Comparison<T> {
    /// Creates a validator checking `input <comparator> operand`.
    pub fn new(comparator: Comparator, operand: T) -> Self {
        Self {
            comparator,
            operand,
        }
    }

    /// Returns the relation this validator checks.
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Returns the fixed operand.
    pub fn operand(&self) -> &T {
        &self.operand
    }
}

impl<T> Validator for Comparison<T>
where
    T: PartialOrd + Clone + Serialize + Send + Sync,
{
    type Input = T;
    type Output = T;

    fn validate(&self, input: &T, sink: &mut dyn FindingSink) -> Checked<T> {
        if !self.comparator.holds(input, &self.operand) {
            sink.report(Finding::new(COMPARISON).with_details(ComparisonDetails {
                comparator: self.comparator,
                compared_value: &self.operand,
            }));
        }
        Ok(input.clone())
    }
}

/// Checks `input == operand`.
pub fn is_equal_to<T>(operand: T) -> Comparison<T> {
    Comparison::new(Comparator::Equal, operand)
}

/// Checks `input != operand`.
pub fn is_not_equal_to<T>(operand: T) -> Comparison<T> {
    Comparison::new(Comparator::NotEqual, operand)
}

/// Checks `input < limit`.
pub fn is_less_than<T>(limit: T) -> Comparison<T> {
    Comparison::new(Comparator::Less, limit)
}

/// Checks `input <= limit`.
pub fn is_less_or_equal<T>(limit: T) -> Comparison<T> {
    Comparison::new(Comparator::LessOrEqual, limit)
}

/// Checks `input > limit`.
pub fn is_greater_than<T>(limit: T) -> Comparison<T> {
    Comparison::new(Comparator::Greater, limit)
}

/// Checks `input >= limit`.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::is_greater_or_equal;
/// use scrutiny::validate;
/// use serde_json::json;
///
/// let outcome = validate(&17.0, &is_greater_or_equal(18.0));
/// let finding = &outcome.into_findings()[0];
///
/// assert_eq!(finding.key, "comparison");
/// assert_eq!(finding.details, json!({"comparator": ">=", "compared_value": 18.0}));
/// ```
pub fn is_greater_or_equal<T>(limit: T) -> Comparison<T> {
    Comparison::new(Comparator::GreaterOrEqual, limit)
}
