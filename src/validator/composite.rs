//! Structural composition.
//!
//! This module provides [`Composite`], which builds a typed record from a JSON
//! object field by field, and [`Exact`], its exact mode that also flags keys
//! the schema does not consume.
//!
//! Every field validator sees the same input object and reports through the
//! shared sink with the field's key prepended to its paths. Fields never
//! short-circuit each other: if one aborts, the remaining fields still run and
//! report before the composite aborts.

use std::marker::PhantomData;

use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::traits::{Abort, BoxValidator, Checked, FindingSink, Scoped, Validator, ValidatorExt};
use crate::error::Finding;
use crate::path::PathSegment;

/// Finding key reported in exact mode when the input has keys the schema does not consume.
pub const UNEXPECTED_KEYS: &str = "unexpected_keys";

/// Finding key reported when the assembled fields do not fit the target record type.
pub const RECORD_SHAPE: &str = "record_shape";

/// Details of an [`UNEXPECTED_KEYS`] finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnexpectedKeysDetails {
    /// Keys declared on the composite.
    pub expected_keys: Vec<String>,
    /// Keys present on the input object.
    pub actual_keys: Vec<String>,
    /// Input keys the schema did not consume.
    pub unexpected_keys: Vec<String>,
}

/// How a field treats a key that is absent from the input.
enum Presence {
    /// The field validator runs on `null`.
    Required,
    /// The field is left out of the record.
    Optional,
    /// The default is inserted without validation.
    Default(Value),
}

/// Definition of a field within a composite.
struct FieldDef {
    validator: BoxValidator<Value, Value>,
    presence: Presence,
}

/// A builder and validator for typed records.
///
/// `Composite<T>` validates a JSON object (`serde_json::Map`) and produces a
/// `T`. Fields are declared with [`add`](Self::add) and friends; each field
/// output is serialized into a JSON record, which is then deserialized into
/// `T`. The default `T` is the record map itself.
///
/// Adding a key twice keeps both fields. They run in declaration order on the
/// same input value; the findings of both are reported, and the later output
/// replaces the earlier one in the record.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_type_object, is_number_between, is_string_between, Interval};
/// use scrutiny::{validate, Chain, Composite};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Person {
///     name: String,
///     age: f64,
/// }
///
/// let person = Chain::of(has_type_object()).and(
///     Composite::<Person>::of()
///         .add("name", is_string_between(Interval::between(3.0, 10.0)))
///         .add("age", is_number_between(Interval::between(18.0, 200.0))),
/// );
///
/// let outcome = validate(&json!({"name": "Alice", "age": 42}), &person);
/// assert_eq!(outcome.value().unwrap(), Person { name: "Alice".into(), age: 42.0 });
///
/// let findings = validate(&json!({"name": 7, "age": 42}), &person).into_findings();
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].path.to_strings(), vec!["name"]);
/// ```
pub struct Composite<T = Map<String, Value>> {
    fields: IndexMap<String, Vec<FieldDef>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Composite<T> {
    /// Creates a composite with no fields.
    pub fn of() -> Self {
        Self {
            fields: IndexMap::new(),
            _record: PhantomData,
        }
    }

    fn insert<V>(mut self, key: impl Into<String>, validator: V, presence: Presence) -> Self
    where
        V: Validator<Input = Value> + 'static,
        V::Output: Serialize,
    {
        self.fields.entry(key.into()).or_default().push(FieldDef {
            validator: validator.to_json().boxed(),
            presence,
        });
        self
    }

    /// Adds a field validated by `validator`.
    ///
    /// A key missing from the input is presented to the validator as `null`,
    /// so a validator that does not accept `null` reports it at the field's path.
    pub fn add<V>(self, key: impl Into<String>, validator: V) -> Self
    where
        V: Validator<Input = Value> + 'static,
        V::Output: Serialize,
    {
        self.insert(key, validator, Presence::Required)
    }

    /// Adds a field that may be absent.
    ///
    /// An absent key is left out of the record and reports nothing. A present
    /// key (including one set to `null`) is validated by `validator`.
    pub fn add_optional<V>(self, key: impl Into<String>, validator: V) -> Self
    where
        V: Validator<Input = Value> + 'static,
        V::Output: Serialize,
    {
        self.insert(key, validator, Presence::Optional)
    }

    /// Adds a field that falls back to `default` when absent.
    pub fn add_default<V>(self, key: impl Into<String>, validator: V, default: Value) -> Self
    where
        V: Validator<Input = Value> + 'static,
        V::Output: Serialize,
    {
        self.insert(key, validator, Presence::Default(default))
    }

    /// Returns the declared field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Switches to exact mode. See [`Exact`].
    pub fn exact(self) -> Exact<T> {
        Exact { composite: self }
    }

    /// Runs every field against `object` and assembles the record.
    ///
    /// Aborts only after all fields ran if any of them aborted.
    fn build_record(
        &self,
        object: &Map<String, Value>,
        sink: &mut dyn FindingSink,
    ) -> Checked<Map<String, Value>> {
        let mut record = Map::new();
        let mut aborted = false;

        for (key, fields) in &self.fields {
            for field in fields {
                let value = match (object.get(key), &field.presence) {
                    (Some(value), _) => value,
                    (None, Presence::Required) => &Value::Null,
                    (None, Presence::Optional) => continue,
                    (None, Presence::Default(default)) => {
                        record.insert(key.clone(), default.clone());
                        continue;
                    }
                };

                let mut scoped = Scoped::new(sink, PathSegment::field(key.clone()));
                match field.validator.validate(value, &mut scoped) {
                    Ok(output) => {
                        record.insert(key.clone(), output);
                    }
                    Err(Abort) => aborted = true,
                }
            }
        }

        if aborted {
            Err(Abort)
        } else {
            Ok(record)
        }
    }
}

impl<T: DeserializeOwned> Composite<T> {
    fn finish(record: Map<String, Value>, sink: &mut dyn FindingSink) -> Checked<T> {
        serde_json::from_value(Value::Object(record)).map_err(|err| {
            sink.report(
                Finding::new(RECORD_SHAPE).with_details(serde_json::json!({ "error": err.to_string() })),
            );
            Abort
        })
    }
}

impl Composite<Map<String, Value>> {
    /// Creates a composite with no fields whose record is the JSON map itself.
    pub fn record() -> Self {
        Self::of()
    }
}

impl<T> Default for Composite<T> {
    fn default() -> Self {
        Self::of()
    }
}

impl<T: DeserializeOwned> Validator for Composite<T> {
    type Input = Map<String, Value>;
    type Output = T;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<T> {
        let record = self.build_record(input, sink)?;
        Self::finish(record, sink)
    }
}

/// Exact mode of a [`Composite`].
///
/// Behaves like the composite, and additionally checks the input for keys that
/// no field declares. If there are any, one [`UNEXPECTED_KEYS`] finding is
/// reported at the object's own path. This is a soft failure: the record is
/// still returned. The check is skipped when a field aborted.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::has_type_string;
/// use scrutiny::{validate, Composite, Validator};
/// use serde_json::{json, Map, Value};
///
/// let exact = Composite::record()
///     .add("name", has_type_string())
///     .exact();
///
/// let input = json!({"name": "x", "extra": 1});
/// let mut sink = Vec::new();
/// let record = exact.validate(input.as_object().unwrap(), &mut sink).unwrap();
///
/// assert_eq!(Value::Object(record), json!({"name": "x"}));
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink[0].key, "unexpected_keys");
/// ```
pub struct Exact<T = Map<String, Value>> {
    composite: Composite<T>,
}

impl<T: DeserializeOwned> Validator for Exact<T> {
    type Input = Map<String, Value>;
    type Output = T;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<T> {
        let record = self.composite.build_record(input, sink)?;

        let unexpected: IndexSet<&String> = input
            .keys()
            .filter(|key| !self.composite.fields.contains_key(key.as_str()))
            .collect();

        if !unexpected.is_empty() {
            let details = UnexpectedKeysDetails {
                expected_keys: self.composite.fields.keys().cloned().collect(),
                actual_keys: input.keys().cloned().collect(),
                unexpected_keys: unexpected.into_iter().cloned().collect(),
            };
            sink.report(Finding::new(UNEXPECTED_KEYS).with_details(details));
        }

        Composite::<T>::finish(record, sink)
    }
}
