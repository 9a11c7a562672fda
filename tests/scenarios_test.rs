//! Acceptance scenarios for records, arrays, alternatives and exact mode.

use scrutiny::leaf::{
    has_type_object, has_type_string, is_null, is_number_between, is_string_between,
    is_valid_uuid, Interval,
};
use scrutiny::validator::UnexpectedKeysDetails;
use scrutiny::{array_of, validate, Chain, Composite, Switch, ValidatorExt};
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: f64,
}

fn person() -> impl scrutiny::Validator<Input = Value, Output = Person> {
    Chain::of(has_type_object()).and(
        Composite::<Person>::of()
            .add("name", is_string_between(Interval::between(3.0, 10.0)))
            .add("age", is_number_between(Interval::between(18.0, 200.0))),
    )
}

#[test]
fn test_valid_record() {
    let outcome = validate(&json!({"name": "Alice", "age": 42}), &person());

    assert!(outcome.is_valid());
    assert_eq!(
        outcome.value().unwrap(),
        Person {
            name: "Alice".to_string(),
            age: 42.0
        }
    );
}

#[test]
fn test_wrong_field_type() {
    let outcome = validate(&json!({"name": 7, "age": 42}), &person());

    let findings = outcome.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].path.to_strings(), vec!["name"]);
    assert_eq!(findings[0].key, "invalid_type");
}

#[test]
fn test_array_element_of_wrong_type() {
    let strings = array_of(has_type_string());
    let input = vec![json!("a"), json!(3)];

    let findings = validate(&input, &strings).into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].path.to_strings(), vec!["1"]);
}

#[test]
fn test_null_or_uuid() {
    let id = Switch::of(is_null().map(|()| None))
        .or(Chain::of(has_type_string()).and(is_valid_uuid()).map(Some));

    assert_eq!(validate(&json!(null), &id).value().unwrap(), None);
    assert_eq!(
        validate(&json!("6b4be894-2b29-46d4-9257-1fb5e0deb094"), &id)
            .value()
            .unwrap(),
        Some("6b4be894-2b29-46d4-9257-1fb5e0deb094".to_string())
    );

    let findings = validate(&json!("not-a-uuid"), &id).into_findings();
    let keys: Vec<_> = findings.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["constant", "invalid_string"]);
}

#[test]
fn test_exact_mode_reports_extra_key_without_aborting() {
    let exact = Composite::record().add("name", has_type_string()).exact();
    let input = json!({"name": "x", "extra": 1});
    let object: &Map<String, Value> = input.as_object().unwrap();

    let mut sink = Vec::new();
    let record = scrutiny::Validator::validate(&exact, object, &mut sink).unwrap();

    assert_eq!(Value::Object(record), json!({"name": "x"}));
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].key, "unexpected_keys");

    let details: UnexpectedKeysDetails = sink[0].details_as().unwrap();
    assert_eq!(details.unexpected_keys, vec!["extra"]);

    // Through the entry point the outcome is invalid, with that single finding.
    let outcome = validate(object, &exact);
    assert_eq!(outcome.findings().count(), 1);
}

#[test]
fn test_exact_mode_with_defaults_still_reports_extra_key() {
    let profile = Chain::of(has_type_object()).and(
        Composite::record()
            .add("name", has_type_string())
            .add_default("role", has_type_string(), json!("member"))
            .add_optional("nickname", has_type_string())
            .exact(),
    );

    let outcome = validate(&json!({"name": "x", "extra": 1}), &profile);
    let findings = outcome.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].key, "unexpected_keys");
    assert!(findings[0].path.is_root());

    let details: UnexpectedKeysDetails = findings[0].details_as().unwrap();
    assert_eq!(details.expected_keys, vec!["name", "role", "nickname"]);
    assert_eq!(details.unexpected_keys, vec!["extra"]);

    let outcome = validate(&json!({"name": "x", "nickname": "y"}), &profile);
    assert_eq!(
        outcome.value().unwrap(),
        json!({"name": "x", "role": "member", "nickname": "y"})
            .as_object()
            .unwrap()
            .clone()
    );
}
