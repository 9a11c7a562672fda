//! Validator registry for named validators and recursive references.
//!
//! This module provides the [`ValidatorRegistry`] type that stores named
//! validators over JSON values, and [`Reference`], a validator that resolves a
//! name against the registry each time it runs. References are what make
//! recursive schemas possible: a composite may refer to itself by name.

use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::Finding;
use crate::validation::{validate, Outcome};
use crate::validator::{Abort, Checked, FindingSink, Validator, ValidatorExt};

/// Finding key reported when references nest deeper than the registry allows.
pub const MAX_DEPTH_EXCEEDED: &str = "max_depth_exceeded";

/// Finding key reported when a reference names no registered validator.
pub const UNKNOWN_REFERENCE: &str = "unknown_reference";

/// A registered validator with its output erased to JSON.
pub type JsonValidator = dyn Validator<Input = Value, Output = Value>;

type ValidatorMap = HashMap<String, Arc<JsonValidator>>;

const DEFAULT_MAX_DEPTH: usize = 100;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Tracks one level of reference nesting on the current thread.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }

    fn current() -> usize {
        DEPTH.with(Cell::get)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// A thread-safe registry of named validators.
///
/// Every validator is stored with its output converted to JSON, so validators
/// of any output type can be registered side by side. Cloning the registry is
/// cheap and clones share the same storage.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_type_object, has_type_string};
/// use scrutiny::{value_or_null, Chain, Composite, ValidatorRegistry};
/// use serde_json::json;
///
/// let registry = ValidatorRegistry::new();
///
/// // A comment may have a parent comment.
/// registry
///     .register(
///         "Comment",
///         Chain::of(has_type_object()).and(
///             Composite::record()
///                 .add("text", has_type_string())
///                 .add("parent", value_or_null(registry.reference("Comment"))),
///         ),
///     )
///     .unwrap();
///
/// let input = json!({"text": "re", "parent": {"text": 7, "parent": null}});
/// let findings = registry.validate("Comment", &input).unwrap().into_findings();
/// assert_eq!(findings.len(), 2);
/// ```
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: Arc<RwLock<ValidatorMap>>,
    referenced: Arc<RwLock<BTreeSet<String>>>,
    max_depth: usize,
}

impl ValidatorRegistry {
    /// Creates a new empty registry with the default max depth (100).
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
            referenced: Arc::new(RwLock::new(BTreeSet::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum reference depth.
    ///
    /// References created afterwards by [`reference`](Self::reference) report
    /// `max_depth_exceeded` and abort once this many references are already
    /// active on the current thread.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the maximum reference depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers a validator under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator<Input = Value> + 'static,
        V::Output: Serialize,
    {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        debug!(name = %name, "registering validator");
        validators.insert(name, Arc::new(validator.to_json()));
        Ok(())
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<Arc<JsonValidator>> {
        self.validators.read().get(name).cloned()
    }

    /// Returns true if a validator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Creates a validator that resolves `name` in this registry when it runs.
    ///
    /// The name does not have to be registered yet, which allows a validator
    /// to refer to itself. The reference does not keep the registry alive.
    pub fn reference(&self, name: impl Into<String>) -> Reference {
        let name = name.into();
        self.referenced.write().insert(name.clone());
        Reference {
            name,
            validators: Arc::downgrade(&self.validators),
            max_depth: self.max_depth,
        }
    }

    /// Returns the names referenced through [`reference`](Self::reference)
    /// that are not registered, sorted.
    ///
    /// Call this after all validators are registered to check that every
    /// reference will resolve.
    pub fn unresolved_references(&self) -> Vec<String> {
        let validators = self.validators.read();
        self.referenced
            .read()
            .iter()
            .filter(|name| !validators.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    /// Validates `value` against the validator registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ValidatorNotFound` if the name is not registered.
    pub fn validate(&self, name: &str, value: &Value) -> Result<Outcome<Value>, RegistryError> {
        let validator = self
            .get(name)
            .ok_or_else(|| RegistryError::ValidatorNotFound(name.to_string()))?;

        Ok(validate(value, validator.as_ref()))
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A validator that delegates to a named entry of a [`ValidatorRegistry`].
///
/// Created with [`ValidatorRegistry::reference`].
#[derive(Clone)]
pub struct Reference {
    name: String,
    validators: Weak<RwLock<ValidatorMap>>,
    max_depth: usize,
}

impl Reference {
    /// Returns the referenced name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Option<Arc<JsonValidator>> {
        self.validators.upgrade()?.read().get(&self.name).cloned()
    }
}

impl Validator for Reference {
    type Input = Value;
    type Output = Value;

    fn validate(&self, input: &Value, sink: &mut dyn FindingSink) -> Checked<Value> {
        if DepthGuard::current() >= self.max_depth {
            sink.report(
                Finding::new(MAX_DEPTH_EXCEEDED).with_details(json!({ "max_depth": self.max_depth })),
            );
            return Err(Abort);
        }

        // The lock is released before the referenced validator runs.
        let Some(validator) = self.resolve() else {
            sink.report(Finding::new(UNKNOWN_REFERENCE).with_details(json!({ "name": self.name })));
            return Err(Abort);
        };

        let _guard = DepthGuard::enter();
        validator.validate(input, sink)
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a validator with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a name that is not registered.
    #[error("validator '{0}' not found")]
    ValidatorNotFound(String),
}
