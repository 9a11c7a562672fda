//! Validators expecting one specific constant.
//!
//! Both are soft: a mismatch is reported and the expected constant is
//! returned anyway.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Finding;
use crate::validator::{Checked, FindingSink, Validator};

/// Finding key reported when a value is not the expected constant.
pub const CONSTANT: &str = "constant";

/// The constant a validator expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantKind {
    Null,
    Nan,
}

/// Details of a [`CONSTANT`] finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDetails {
    pub expected_value: ConstantKind,
}

fn constant(expected_value: ConstantKind) -> Finding {
    Finding::new(CONSTANT).with_details(ConstantDetails { expected_value })
}

/// Expects JSON `null`.
pub fn is_null() -> IsNull {
    IsNull
}

/// Created with [`is_null`].
#[derive(Debug, Clone, Copy)]
pub struct IsNull;

impl Validator for IsNull {
    type Input = Value;
    type Output = ();

    fn validate(&self, input: &Value, sink: &mut dyn FindingSink) -> Checked<()> {
        if !input.is_null() {
            sink.report(constant(ConstantKind::Null));
        }
        Ok(())
    }
}

/// Expects `NaN`.
pub fn is_nan() -> IsNan {
    IsNan
}

/// Created with [`is_nan`].
#[derive(Debug, Clone, Copy)]
pub struct IsNan;

impl Validator for IsNan {
    type Input = f64;
    type Output = f64;

    fn validate(&self, input: &f64, sink: &mut dyn FindingSink) -> Checked<f64> {
        if !input.is_nan() {
            sink.report(constant(ConstantKind::Nan));
        }
        Ok(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_null() {
        let mut sink = Vec::new();
        assert_eq!(is_null().validate(&json!(null), &mut sink), Ok(()));
        assert!(sink.is_empty());

        for value in [json!(0), json!(""), json!({}), json!([])] {
            assert_eq!(is_null().validate(&value, &mut sink), Ok(()));
        }
        assert_eq!(sink.len(), 4);
        assert_eq!(sink[0].details, json!({"expected_value": "null"}));
    }

    #[test]
    fn test_is_nan() {
        let mut sink = Vec::new();
        assert!(is_nan().validate(&f64::NAN, &mut sink).unwrap().is_nan());
        assert!(sink.is_empty());

        assert!(is_nan().validate(&1.0, &mut sink).unwrap().is_nan());
        assert_eq!(sink[0].details, json!({"expected_value": "nan"}));
    }
}
