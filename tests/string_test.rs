//! Integration tests for string leaves composed with type narrowing.

use scrutiny::leaf::{
    has_type_string, is_nan, is_valid_float_string, is_valid_integer_string, is_valid_json,
    is_valid_uuid, matches, StringDetails, StringError,
};
use scrutiny::{validate, Chain, Switch, ValidatorExt};
use serde_json::json;

#[test]
fn test_uuid_string_reports_but_keeps_value() {
    let uuid = Chain::of(has_type_string()).and(is_valid_uuid());

    let outcome = validate(&json!("11111111-1111-1111-1111-111111111111"), &uuid);
    let finding = outcome.invalid_findings().unwrap().first();

    let details: StringDetails = finding.details_as().unwrap();
    assert_eq!(details.error, StringError::InvalidUuid);
    assert!(finding.path.is_root());
}

#[test]
fn test_json_inside_json() {
    let nested = Chain::of(has_type_string()).and(is_valid_json());

    let outcome = validate(&json!("{\"a\": [1, 2]}"), &nested);
    assert_eq!(outcome.value().unwrap(), json!({"a": [1, 2]}));

    let outcome = validate(&json!("{\"a\": "), &nested);
    assert!(outcome.is_invalid());
}

#[test]
fn test_unparseable_number_flows_on_as_nan() {
    let not_a_number = Chain::of(has_type_string())
        .and(is_valid_float_string())
        .and(is_nan());

    let keys = |input: serde_json::Value| -> Vec<String> {
        validate(&input, &not_a_number)
            .into_findings()
            .into_iter()
            .map(|f| f.key)
            .collect()
    };

    assert_eq!(keys(json!("abc")), vec!["invalid_string"]);
    assert_eq!(keys(json!("2.5")), vec!["constant"]);
}

#[test]
fn test_integer_or_float_switch() {
    let number = Chain::of(has_type_string())
        .and(Switch::of(is_valid_integer_string()).or(is_valid_float_string()));

    assert_eq!(validate(&json!("12"), &number).value().unwrap(), 12.0);
    assert_eq!(validate(&json!(".5"), &number).value().unwrap(), 0.5);

    let findings = validate(&json!("x"), &number).into_findings();
    let errors: Vec<_> = findings
        .iter()
        .map(|f| f.details_as::<StringDetails>().unwrap().error)
        .collect();
    assert_eq!(errors, vec![StringError::InvalidInteger, StringError::InvalidFloat]);
}

#[test]
fn test_pattern_after_type() {
    let code = Chain::of(has_type_string())
        .and(matches(r"^[A-Z]{3}$").unwrap())
        .map(|s| s.to_lowercase());

    assert_eq!(validate(&json!("ABC"), &code).value().unwrap(), "abc");

    let findings = validate(&json!("abcd"), &code).into_findings();
    assert_eq!(findings[0].key, "pattern_mismatch");
    assert_eq!(findings[0].details, json!({"pattern": "^[A-Z]{3}$"}));
}
