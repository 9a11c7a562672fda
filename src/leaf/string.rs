//! String format validators.
//!
//! These read a `String` (usually the output of
//! [`has_type_string`](super::has_type_string)) and check or parse its
//! contents. Parsing JSON is a hard failure because nothing usable remains.
//! The other checks are soft: they report and hand on a value (the input
//! itself, or `NaN` for an unparseable number) so later stages still run.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::{Uuid, Variant};

use crate::error::Finding;
use crate::validator::{Abort, Checked, FindingSink, Validator};

/// Finding key reported when a string has the wrong format.
pub const INVALID_STRING: &str = "invalid_string";

/// Finding key reported by [`matches`] when the pattern does not match.
pub const PATTERN_MISMATCH: &str = "pattern_mismatch";

/// Which format a string failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringError {
    InvalidJson,
    InvalidUuid,
    InvalidInteger,
    InvalidFloat,
}

/// Details of an [`INVALID_STRING`] finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringDetails {
    pub error: StringError,
}

fn invalid_string(error: StringError) -> Finding {
    Finding::new(INVALID_STRING).with_details(StringDetails { error })
}

/// Accepts the hyphenated form with an RFC 4122 variant and versions 1 to 8,
/// plus the nil and max UUIDs.
fn is_uuid(text: &str) -> bool {
    if text.len() != 36 {
        return false;
    }
    let Ok(uuid) = Uuid::try_parse(text) else {
        return false;
    };
    if uuid.is_nil() || uuid.as_u128() == u128::MAX {
        return true;
    }
    uuid.get_variant() == Variant::RFC4122 && (1..=8).contains(&uuid.get_version_num())
}

fn float_prefix_regex() -> &'static Regex {
    static FLOAT: OnceLock<Regex> = OnceLock::new();
    FLOAT.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("float pattern is valid")
    })
}

/// Parses the leading decimal integer of `text`, ignoring leading whitespace
/// and whatever follows the digits.
fn parse_integer_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => ("-", &text[1..]),
        Some(b'+') => ("", &text[1..]),
        _ => ("", text),
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    format!("{sign}{}", &rest[..digits]).parse().ok()
}

/// Parses the longest leading decimal literal of `text`, ignoring leading
/// whitespace and whatever follows it.
fn parse_float_prefix(text: &str) -> Option<f64> {
    let literal = float_prefix_regex().find(text.trim_start())?.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse().ok(),
    }
}

/// Parses a string as JSON.
///
/// Unparseable text reports `invalid_json` and aborts.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_type_object, is_valid_json};
/// use scrutiny::{validate, Chain};
/// use serde_json::json;
///
/// let payload = Chain::of(is_valid_json()).and(has_type_object());
///
/// let object = validate(&r#"{"a": 42}"#.to_string(), &payload).value().unwrap();
/// assert_eq!(object["a"], json!(42));
///
/// assert!(validate(&"{'a': 42}".to_string(), &payload).is_invalid());
/// ```
pub fn is_valid_json() -> IsValidJson {
    IsValidJson
}

/// Created with [`is_valid_json`].
#[derive(Debug, Clone, Copy)]
pub struct IsValidJson;

impl Validator for IsValidJson {
    type Input = String;
    type Output = Value;

    fn validate(&self, input: &String, sink: &mut dyn FindingSink) -> Checked<Value> {
        serde_json::from_str(input).map_err(|_| {
            sink.report(invalid_string(StringError::InvalidJson));
            Abort
        })
    }
}

/// Checks that a string is a hyphenated UUID.
///
/// Versions 1 to 8 with the RFC 4122 variant are accepted, as are the nil and
/// max UUIDs. Case is ignored. An invalid UUID reports `invalid_uuid` and the input is
/// still returned.
pub fn is_valid_uuid() -> IsValidUuid {
    IsValidUuid
}

/// Created with [`is_valid_uuid`].
#[derive(Debug, Clone, Copy)]
pub struct IsValidUuid;

impl Validator for IsValidUuid {
    type Input = String;
    type Output = String;

    fn validate(&self, input: &String, sink: &mut dyn FindingSink) -> Checked<String> {
        if !is_uuid(input) {
            sink.report(invalid_string(StringError::InvalidUuid));
        }
        Ok(input.clone())
    }
}

/// Parses the leading integer of a string.
///
/// Trailing text is ignored, so `"+41-.3f"` yields `41.0` and `"-2.6977E3"`
/// yields `-2.0`. If there is no leading integer, `invalid_integer` is
/// reported and `NaN` is returned.
pub fn is_valid_integer_string() -> IsValidIntegerString {
    IsValidIntegerString
}

/// Created with [`is_valid_integer_string`].
#[derive(Debug, Clone, Copy)]
pub struct IsValidIntegerString;

impl Validator for IsValidIntegerString {
    type Input = String;
    type Output = f64;

    fn validate(&self, input: &String, sink: &mut dyn FindingSink) -> Checked<f64> {
        Ok(parse_integer_prefix(input).unwrap_or_else(|| {
            sink.report(invalid_string(StringError::InvalidInteger));
            f64::NAN
        }))
    }
}

/// Parses the leading decimal number of a string.
///
/// Accepts exponents, a bare leading dot and `Infinity`. If there is no
/// leading number, `invalid_float` is reported and `NaN` is returned.
pub fn is_valid_float_string() -> IsValidFloatString {
    IsValidFloatString
}

/// Created with [`is_valid_float_string`].
#[derive(Debug, Clone, Copy)]
pub struct IsValidFloatString;

impl Validator for IsValidFloatString {
    type Input = String;
    type Output = f64;

    fn validate(&self, input: &String, sink: &mut dyn FindingSink) -> Checked<f64> {
        Ok(parse_float_prefix(input).unwrap_or_else(|| {
            sink.report(invalid_string(StringError::InvalidFloat));
            f64::NAN
        }))
    }
}

/// Checks a string against a regular expression.
///
/// A mismatch reports `pattern_mismatch` with the pattern in its details and
/// the input is still returned.
///
/// # Errors
///
/// Returns the regex error if `pattern` does not compile.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_type_string, matches};
/// use scrutiny::{validate, Chain};
/// use serde_json::json;
///
/// let slug = Chain::of(has_type_string()).and(matches(r"^[a-z-]+$").unwrap());
///
/// assert!(validate(&json!("hello-world"), &slug).is_valid());
/// assert_eq!(validate(&json!("Hello"), &slug).into_findings()[0].key, "pattern_mismatch");
/// ```
pub fn matches(pattern: &str) -> Result<Matches, regex::Error> {
    Ok(Matches {
        regex: Regex::new(pattern)?,
    })
}

/// Created with [`matches`].
#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
}

impl Validator for Matches {
    type Input = String;
    type Output = String;

    fn validate(&self, input: &String, sink: &mut dyn FindingSink) -> Checked<String> {
        if !self.regex.is_match(input) {
            sink.report(
                Finding::new(PATTERN_MISMATCH).with_details(json!({ "pattern": self.regex.as_str() })),
            );
        }
        Ok(input.clone())
    }
}
