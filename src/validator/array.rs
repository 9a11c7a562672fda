//! Element-wise validation of sequences.
//!
//! [`array_of`] lifts a validator of one element to a validator of a `Vec` of
//! them. Each element reports under its own index and elements never
//! short-circuit each other.

use tracing::trace;

use super::traits::{Abort, Checked, FindingSink, Scoped, Validator};
use crate::path::PathSegment;

/// Validates every element of a sequence with the same validator.
///
/// Created with [`array_of`].
#[derive(Debug, Clone)]
pub struct ArrayOf<V> {
    item: V,
}

/// Builds a validator that applies `item` to every element of a `Vec`.
///
/// Findings reported for element `i` get `i` prepended to their path. If any
/// element aborts, the array aborts once every element has been validated.
///
/// # Example
///
/// ```rust
/// use scrutiny::leaf::{has_type_array, has_type_string};
/// use scrutiny::{array_of, validate, Chain};
/// use serde_json::json;
///
/// let tags = Chain::of(has_type_array()).and(array_of(has_type_string()));
///
/// assert_eq!(validate(&json!(["a", "b"]), &tags).value().unwrap(), vec!["a", "b"]);
///
/// let findings = validate(&json!(["a", 1, "c", false]), &tags).into_findings();
/// let paths: Vec<_> = findings.iter().map(|f| f.path.to_string()).collect();
/// assert_eq!(paths, vec!["[1]", "[3]"]);
/// ```
pub fn array_of<V>(item: V) -> ArrayOf<V>
where
    V: Validator,
    V::Input: Sized,
{
    ArrayOf { item }
}

impl<V> Validator for ArrayOf<V>
where
    V: Validator,
    V::Input: Sized,
{
    type Input = Vec<V::Input>;
    type Output = Vec<V::Output>;

    fn validate(&self, input: &Self::Input, sink: &mut dyn FindingSink) -> Checked<Self::Output> {
        let mut outputs = Vec::with_capacity(input.len());
        let mut aborted = 0usize;

        for (index, element) in input.iter().enumerate() {
            let mut scoped = Scoped::new(sink, PathSegment::index(index));
            match self.item.validate(element, &mut scoped) {
                Ok(output) => outputs.push(output),
                Err(Abort) => aborted += 1,
            }
        }

        if aborted > 0 {
            trace!(elements = input.len(), aborted, "array elements aborted");
            return Err(Abort);
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::testing::mock;
    use crate::validator::from_fn;

    /// Passes even numbers, soft-fails odd ones and aborts on negatives.
    fn parity() -> impl Validator<Input = i32, Output = i32> {
        from_fn(|n: &i32, sink: &mut dyn FindingSink| {
            if *n < 0 {
                sink.report(mock("negative"));
                return Err(Abort);
            }
            if n % 2 != 0 {
                sink.report(mock("odd"));
            }
            Ok(*n)
        })
    }

    #[test]
    fn test_empty_array() {
        let mut sink = Vec::new();
        assert_eq!(array_of(parity()).validate(&vec![], &mut sink), Ok(vec![]));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_outputs_in_order() {
        let mut sink = Vec::new();
        let result = array_of(parity()).validate(&vec![2, 4, 6], &mut sink);
        assert_eq!(result, Ok(vec![2, 4, 6]));
    }

    #[test]
    fn test_soft_failures_keep_values() {
        let mut sink = Vec::new();
        let result = array_of(parity()).validate(&vec![2, 3, 4, 5], &mut sink);

        assert_eq!(result, Ok(vec![2, 3, 4, 5]));
        let paths: Vec<_> = sink.iter().map(|f| f.path.to_strings()).collect();
        assert_eq!(paths, vec![vec!["1"], vec!["3"]]);
    }

    #[test]
    fn test_abort_after_all_elements() {
        let mut sink = Vec::new();
        let result = array_of(parity()).validate(&vec![-1, 3, -5], &mut sink);

        assert_eq!(result, Err(Abort));
        let paths: Vec<_> = sink.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["[0]", "[1]", "[2]"]);
    }

    #[test]
    fn test_nested_arrays() {
        let mut sink = Vec::new();
        let matrix = array_of(array_of(parity()));
        let result = matrix.validate(&vec![vec![2], vec![4, 7]], &mut sink);

        assert!(result.is_ok());
        assert_eq!(sink[0].path.to_strings(), vec!["1", "1"]);
    }
}
