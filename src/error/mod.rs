//! Finding and error types.
//!
//! Problems found in the input are data: they are reported as [`Finding`]s and
//! collected into [`Findings`]. The only Rust error a caller sees from a
//! validation run is [`ValidationFailed`], returned when asking an invalid
//! outcome for its value.

mod finding;

pub use finding::{Finding, Findings};

/// Returned by [`Outcome::value`](crate::Outcome::value) when the outcome is invalid.
///
/// It carries no payload. Callers that need diagnostics read the findings
/// from the outcome before (or instead of) asking for the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("validation failed")]
pub struct ValidationFailed;
