//! Tests for how chain, switch, composite and array propagate findings and aborts.

use scrutiny::{
    array_of, from_fn, validate, Abort, Chain, Checked, Composite, Finding, FindingSink,
    JsonPath, Switch, Validator,
};
use serde_json::{json, Value};

/// Reports a finding tagged `id` at a nested path, then returns `value`.
fn soft(id: &'static str, value: i64) -> impl Validator<Input = Value, Output = i64> {
    from_fn(move |_: &Value, sink: &mut dyn FindingSink| {
        sink.report(
            Finding::new("mock")
                .with_details(json!({ "id": id }))
                .at(JsonPath::from_field("inner")),
        );
        Ok(value)
    })
}

/// Reports a finding tagged `id`, then aborts.
fn hard(id: &'static str) -> impl Validator<Input = Value, Output = i64> {
    from_fn(move |_: &Value, sink: &mut dyn FindingSink| -> Checked<i64> {
        sink.report(Finding::new("mock").with_details(json!({ "id": id })));
        Err(Abort)
    })
}

fn ok(value: i64) -> impl Validator<Input = Value, Output = i64> {
    from_fn(move |_: &Value, _: &mut dyn FindingSink| Ok(value))
}

/// Lifts an `i64 -> i64` stage so it can follow another stage in a chain.
fn stage(
    id: &'static str,
    aborts: bool,
) -> impl Validator<Input = i64, Output = i64> {
    from_fn(move |n: &i64, sink: &mut dyn FindingSink| {
        sink.report(Finding::new("mock").with_details(json!({ "id": id })));
        if aborts {
            Err(Abort)
        } else {
            Ok(n + 1)
        }
    })
}

fn ids<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Vec<String> {
    findings
        .into_iter()
        .map(|f| f.details["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_valid_outcome_yields_value() {
    let chain = Chain::of(ok(1)).and(from_fn(|n: &i64, _: &mut dyn FindingSink| Ok(n * 10)));
    let outcome = validate(&json!(null), &chain);

    assert_eq!(outcome.findings().count(), 0);
    assert_eq!(outcome.value().unwrap(), 10);
}

#[test]
fn test_array_tags_findings_with_index() {
    let validator = array_of(from_fn(|v: &Value, sink: &mut dyn FindingSink| {
        if v.is_string() {
            sink.report(Finding::new("mock").at(JsonPath::from_field("inner")));
        }
        Ok(v.clone())
    }));

    let input = vec![json!(1), json!("a"), json!(2), json!("b")];
    let findings = validate(&input, &validator).into_findings();

    let paths: Vec<_> = findings.iter().map(|f| f.path.to_strings()).collect();
    assert_eq!(paths, vec![vec!["1", "inner"], vec!["3", "inner"]]);
}

#[test]
fn test_composite_tags_findings_with_key() {
    let composite = Composite::record().add("k", soft("f", 1));
    let findings = validate(&serde_json::Map::new(), &composite).into_findings();

    assert_eq!(findings[0].path.to_strings(), vec!["k", "inner"]);
}

#[test]
fn test_chain_stops_at_abort_and_keeps_order() {
    let chain = Chain::of(soft("s0", 0))
        .and(stage("s1", false))
        .and(stage("s2", true))
        .and(stage("s3", false));

    let outcome = validate(&json!(null), &chain);
    assert!(outcome.is_invalid());
    assert_eq!(ids(outcome.findings()), vec!["s0", "s1", "s2"]);
}

#[test]
fn test_switch_first_clean_success_hides_later_alternatives() {
    let switch = Switch::of(ok(1)).or(soft("later", 2)).or(hard("last"));

    let outcome = validate(&json!(null), &switch);
    assert!(outcome.is_valid());
    assert_eq!(outcome.value().unwrap(), 1);
}

#[test]
fn test_switch_failure_reports_every_alternative_in_order() {
    let switch = Switch::of(soft("a", 1)).or(hard("b")).or(soft("c", 3));

    let outcome = validate(&json!(null), &switch);
    assert_eq!(ids(outcome.findings()), vec!["a", "b", "c"]);
    assert!(outcome.value().is_err());
}

#[test]
fn test_switch_discards_losing_findings_when_later_alternative_wins() {
    let switch = Switch::of(hard("a")).or(soft("b", 2)).or(ok(3));

    let outcome = validate(&json!(null), &switch);
    assert_eq!(outcome.value().unwrap(), 3);
}

#[test]
fn test_composite_runs_every_field_before_abort() {
    let composite = Composite::record()
        .add("a", hard("fa"))
        .add("b", ok(2))
        .add("c", hard("fc"));

    let mut sink = Vec::new();
    let result = composite.validate(&serde_json::Map::new(), &mut sink);

    assert!(result.is_err());
    assert_eq!(ids(&sink), vec!["fa", "fc"]);
    let paths: Vec<_> = sink.iter().map(|f| f.path.to_string()).collect();
    assert_eq!(paths, vec!["a", "c"]);
}

#[test]
fn test_array_runs_every_element_before_abort() {
    let validator = array_of(from_fn(|v: &Value, sink: &mut dyn FindingSink| -> Checked<i64> {
        match v.as_i64() {
            Some(n) => Ok(n),
            None => {
                sink.report(Finding::new("mock"));
                Err(Abort)
            }
        }
    }));

    let mut sink = Vec::new();
    let input = vec![json!("x"), json!(1), json!("y")];
    assert_eq!(validator.validate(&input, &mut sink), Err(Abort));
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_empty_array_and_empty_composite_are_valid() {
    let array = array_of(hard("never"));
    assert_eq!(validate(&Vec::new(), &array).value().unwrap(), Vec::<i64>::new());

    let composite = Composite::record();
    assert!(validate(&serde_json::Map::new(), &composite).is_valid());
}

#[test]
fn test_soft_failures_everywhere_keep_the_value_but_invalidate() {
    let composite = Composite::record().add("a", soft("fa", 1)).add("b", soft("fb", 2));

    let mut sink = Vec::new();
    let record = composite.validate(&serde_json::Map::new(), &mut sink).unwrap();
    assert_eq!(Value::Object(record), json!({"a": 1, "b": 2}));

    let outcome = validate(&serde_json::Map::new(), &composite);
    assert!(outcome.is_invalid());
    assert_eq!(outcome.findings().count(), 2);
}
