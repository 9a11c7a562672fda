//! Type narrowing from untyped JSON.
//!
//! Each validator here checks the JSON type of a [`Value`] and returns it as
//! the matching Rust type. A mismatch is a hard failure: one `invalid_type`
//! finding is reported and the validator aborts, because no value of the
//! expected type exists to hand on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Finding;
use crate::validator::{Abort, Checked, FindingSink, Validator};

/// Finding key reported when a value has the wrong JSON type.
pub const INVALID_TYPE: &str = "invalid_type";

/// The JSON type a narrowing validator expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedType {
    Boolean,
    Number,
    String,
    Object,
    Array,
}

/// Details of an [`INVALID_TYPE`] finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDetails {
    pub expected_type: ExpectedType,
}

/// Narrows a [`Value`] to `T` or reports [`INVALID_TYPE`].
pub struct HasType<T> {
    expected: ExpectedType,
    narrow: fn(&Value) -> Option<T>,
}

impl<T> HasType<T> {
    /// Returns the JSON type this validator accepts.
    pub fn expected(&self) -> ExpectedType {
        self.expected
    }
}

impl<T> Validator for HasType<T> {
    type Input = Value;
    type Output = T;

    fn validate(&self, input: &Value, sink: &mut dyn FindingSink) -> Checked<T> {
        (self.narrow)(input).ok_or_else(|| {
            sink.report(Finding::new(INVALID_TYPE).with_details(TypeDetails {
                expected_type: self.expected,
            }));
            Abort
        })
    }
}

/// Accepts JSON booleans.
pub fn has_type_boolean() -> HasType<bool> {
    HasType {
        expected: ExpectedType::Boolean,
        narrow: Value::as_bool,
    }
}

/// Accepts JSON numbers, returned as `f64`.
pub fn has_type_number() -> HasType<f64> {
    HasType {
        expected: ExpectedType::Number,
        narrow: Value::as_f64,
    }
}

/// Accepts JSON strings.
pub fn has_type_string() -> HasType<String> {
    HasType {
        expected: ExpectedType::String,
        narrow: |value| value.as_str().map(str::to_owned),
    }
}

/// Accepts JSON objects. `null` and arrays are rejected.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::has_type_object;
/// use scrutiny::validate;
/// use serde_json::json;
///
/// assert!(validate(&json!({"key": "value"}), &has_type_object()).is_valid());
/// assert!(validate(&json!(["value"]), &has_type_object()).is_invalid());
/// assert!(validate(&json!(null), &has_type_object()).is_invalid());
/// ```
pub fn has_type_object() -> HasType<Map<String, Value>> {
    HasType {
        expected: ExpectedType::Object,
        narrow: |value| value.as_object().cloned(),
    }
}

/// Accepts JSON arrays.
pub fn has_type_array() -> HasType<Vec<Value>> {
    HasType {
        expected: ExpectedType::Array,
        narrow: |value| value.as_array().cloned(),
    }
}
