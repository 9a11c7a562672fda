//! Leaf validators.
//!
//! Leaves do the actual checking; combinators only arrange them. Every leaf
//! reports at the root path and lets the enclosing combinators supply the
//! location.
//!
//! | Finding key        | Reported by                                   | Failure |
//! |--------------------|-----------------------------------------------|---------|
//! | `invalid_type`     | `has_type_*`                                  | hard    |
//! | `invalid_string`   | `is_valid_json`                               | hard    |
//! | `invalid_string`   | `is_valid_uuid`, `is_valid_*_string`          | soft    |
//! | `pattern_mismatch` | [`matches`]                                   | soft    |
//! | `comparison`       | `is_equal_to`, `is_less_than`, ...            | soft    |
//! | `constant`         | [`is_null`], [`is_nan`]                       | soft    |
//! | `property`         | [`has_valid_property`], [`is_string_between`] | soft    |

mod comparison;
mod constant;
mod interval;
mod property;
mod string;
mod typing;

pub use comparison::{
    is_equal_to, is_greater_or_equal, is_greater_than, is_less_or_equal, is_less_than,
    is_not_equal_to, Comparator, Comparison, ComparisonDetails, COMPARISON,
};
pub use constant::{is_nan, is_null, ConstantDetails, ConstantKind, IsNan, IsNull, CONSTANT};
pub use interval::{is_number_between, is_string_between, Interval};
pub use property::{has_valid_property, HasValidProperty, PropertyDetails, PROPERTY};
pub use string::{
    is_valid_float_string, is_valid_integer_string, is_valid_json, is_valid_uuid, matches,
    IsValidFloatString, IsValidIntegerString, IsValidJson, IsValidUuid, Matches, StringDetails,
    StringError, INVALID_STRING, PATTERN_MISMATCH,
};
pub use typing::{
    has_type_array, has_type_boolean, has_type_number, has_type_object, has_type_string,
    ExpectedType, HasType, TypeDetails, INVALID_TYPE,
};
