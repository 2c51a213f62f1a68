//! typesift: decide what raw string data actually is.
//!
//! Every string is classified into exactly one [`DataType`] by a fixed
//! chain of shape rules, converted into a native [`TypedValue`], and whole
//! sequences are folded into one dominant type. Nothing here needs a
//! schema, and nothing fails: unrecognized or invalid values degrade to
//! `STRING` and to their original text.
//!
//! # Example
//!
//! ```
//! use typesift::{DataType, TypedValue};
//!
//! assert_eq!(typesift::classify("2024-02-29"), DataType::Date);
//! assert_eq!(typesift::classify("2023-02-29"), DataType::String);
//! assert_eq!(typesift::convert("00123"), TypedValue::Integer(123));
//! assert_eq!(typesift::profile(["1", "", "2", "none", "3"]), DataType::Integer);
//! ```

pub mod error;
pub mod inference;
pub mod schema;
pub mod table;

mod typer;

pub use crate::typer::{Typer, TyperConfig};
pub use error::{Result, TypesiftError};
pub use inference::{
    Classifiable, ClassifyOptions, Profiler, ProfilerConfig, Strategy, TypeDistribution,
    can_classify_beyond_string, classify, classify_with, convert, convert_as, convert_as_with,
    convert_with, normalize,
};
pub use schema::{DataType, TypedValue};
pub use table::{ColumnProfile, TableConfig, TableProfile, TableProfiler};

/// Dominant type of a sequence, using the default profiler.
pub fn profile<I>(values: I) -> DataType
where
    I: IntoIterator,
    I::Item: Classifiable,
{
    Profiler::new().profile(values)
}

/// The process-wide incremental threshold (10,000 unless overridden by
/// `TYPESIFT_INCREMENTAL_THRESHOLD` before first use).
pub fn get_incremental_threshold() -> usize {
    inference::incremental_threshold()
}
