//! Mock validators for combinator unit tests.

use serde_json::json;

use super::traits::{from_fn, Abort, Checked, FindingSink, Validator};
use crate::error::Finding;

pub(crate) fn mock(id: &str) -> Finding {
    Finding::new("mock").with_details(json!({ "id": id }))
}

/// Returns `result` without reporting.
pub(crate) fn valid<I, R>(result: R) -> impl Validator<Input = I, Output = R>
where
    I: 'static,
    R: Clone + Send + Sync + 'static,
{
    from_fn(move |_: &I, _: &mut dyn FindingSink| Ok(result.clone()))
}

/// Reports one mock finding, then returns `result`.
pub(crate) fn reporting<I, R>(result: R, id: &'static str) -> impl Validator<Input = I, Output = R>
where
    I: 'static,
    R: Clone + Send + Sync + 'static,
{
    from_fn(move |_: &I, sink: &mut dyn FindingSink| {
        sink.report(mock(id));
        Ok(result.clone())
    })
}

/// Reports one mock finding, then aborts.
pub(crate) fn aborting<I, R>(id: &'static str) -> impl Validator<Input = I, Output = R>
where
    I: 'static,
    R: 'static,
{
    from_fn(move |_: &I, sink: &mut dyn FindingSink| -> Checked<R> {
        sink.report(mock(id));
        Err(Abort)
    })
}
