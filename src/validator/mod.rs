//! The validator contract and its combinators.
//!
//! - [`Chain`]: sequential composition, threading the value through stages
//! - [`Switch`]: alternatives tried in order, the first clean success wins
//! - [`Composite`]: builds a typed record from an object, field by field
//! - [`array_of`]: validates every element of a sequence

mod array;
mod chain;
mod composite;
mod switch;
mod traits;

#[cfg(test)]
mod testing;

pub use array::{array_of, ArrayOf};
pub use chain::{Chain, Then};
pub use composite::{Composite, Exact, UnexpectedKeysDetails, RECORD_SHAPE, UNEXPECTED_KEYS};
pub use switch::{value_or_null, Switch};
pub use traits::{
    from_fn, Abort, BoxValidator, Checked, FindingSink, FromFn, MapOutput, Scoped, ToJson,
    Validator, ValidatorExt, UNSERIALIZABLE_OUTPUT,
};
