//! Native values produced by conversion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::data_type::DataType;

/// A converted value.
///
/// `Text` carries the original input when it was a plain string, an empty
/// value, or a numeric-looking value that could not be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Null,
    Boolean(bool),
    Integer(i64),
    /// An integer outside the `i64` range, serialized as a decimal string.
    BigInteger(#[serde(with = "decimal_string")] BigInt),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Text(String),
}

impl TypedValue {
    /// The data type this value represents.
    ///
    /// Text is reported as `Empty` when it has no characters and `String`
    /// otherwise; it is not re-parsed.
    pub fn data_type(&self) -> DataType {
        match self {
            TypedValue::Null => DataType::None,
            TypedValue::Boolean(_) => DataType::Boolean,
            TypedValue::Integer(_) | TypedValue::BigInteger(_) => DataType::Integer,
            TypedValue::Float(_) => DataType::Float,
            TypedValue::Date(_) => DataType::Date,
            TypedValue::Time(_) => DataType::Time,
            TypedValue::DateTime(_) => DataType::DateTime,
            TypedValue::Text(s) if s.is_empty() => DataType::Empty,
            TypedValue::Text(_) => DataType::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Either integer variant, at full precision.
    pub fn as_big_int(&self) -> Option<BigInt> {
        match self {
            TypedValue::Integer(i) => Some(BigInt::from(*i)),
            TypedValue::BigInteger(b) => Some(b.clone()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TypedValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            TypedValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            TypedValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<BigInt> for TypedValue {
    fn from(value: BigInt) -> Self {
        TypedValue::BigInteger(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Float(value)
    }
}

impl From<NaiveDate> for TypedValue {
    fn from(value: NaiveDate) -> Self {
        TypedValue::Date(value)
    }
}

impl From<NaiveTime> for TypedValue {
    fn from(value: NaiveTime) -> Self {
        TypedValue::Time(value)
    }
}

impl From<NaiveDateTime> for TypedValue {
    fn from(value: NaiveDateTime) -> Self {
        TypedValue::DateTime(value)
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

mod decimal_string {
    use num_bigint::BigInt;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
