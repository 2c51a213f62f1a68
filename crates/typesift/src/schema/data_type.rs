//! The closed set of data types a value or a sequence can be assigned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesiftError;

/// Inferred data type for a single value or a whole sequence.
///
/// Every variant except [`DataType::Mixed`] can be produced by classifying
/// one value. `Mixed` is only ever the output of profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Text that matched no other rule.
    String,
    /// Whole numbers with an optional sign.
    Integer,
    /// Decimal numbers with a mandatory decimal point.
    Float,
    /// `true`/`false`, `yes`/`no`, `1`/`0`.
    Boolean,
    /// Calendar date only.
    Date,
    /// Time of day only.
    Time,
    /// Date and time of day.
    DateTime,
    /// Zero-length after normalization.
    Empty,
    /// A null token such as `none` or `null`.
    None,
    /// Sequence without a single dominant type.
    Mixed,
}

impl DataType {
    /// Every variant, in declaration order.
    pub const ALL: [DataType; 10] = [
        DataType::String,
        DataType::Integer,
        DataType::Float,
        DataType::Boolean,
        DataType::Date,
        DataType::Time,
        DataType::DateTime,
        DataType::Empty,
        DataType::None,
        DataType::Mixed,
    ];

    /// Short lowercase value, e.g. `"int"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "str",
            DataType::Integer => "int",
            DataType::Float => "float",
            DataType::Boolean => "bool",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::DateTime => "datetime",
            DataType::Empty => "empty",
            DataType::None => "none",
            DataType::Mixed => "mixed",
        }
    }

    /// Uppercase variant name, e.g. `"INTEGER"`.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Time => "TIME",
            DataType::DateTime => "DATETIME",
            DataType::Empty => "EMPTY",
            DataType::None => "NONE",
            DataType::Mixed => "MIXED",
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::Time | DataType::DateTime)
    }

    /// Returns true for the types that never influence a profile.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DataType::Empty | DataType::None)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = TypesiftError;

    /// Accepts either the short value or the variant name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DataType::ALL
            .into_iter()
            .find(|t| {
                wanted.eq_ignore_ascii_case(t.as_str()) || wanted.eq_ignore_ascii_case(t.name())
            })
            .ok_or_else(|| TypesiftError::UnknownDataType(s.to_string()))
    }
}
