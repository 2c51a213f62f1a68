//! Conversion of strings into native values.
//!
//! Conversion classifies first and then parses with the same grammar the
//! classifier matched. Nothing here fails: a value that cannot be produced
//! falls back to the original text (numeric targets) or to `Null`
//! (boolean and temporal targets). Integers of any length convert; those
//! outside `i64` become `TypedValue::BigInteger`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;

use super::classifier::{
    ClassifyOptions, bool_token, classify_prepared, matches_float, matches_integer, prepare,
};
use super::temporal::{parse_date, parse_datetime, parse_time};
use crate::schema::{DataType, TypedValue};

/// Convert a value with default options.
pub fn convert<'a>(value: impl Into<Option<&'a str>>) -> TypedValue {
    convert_with(value, ClassifyOptions::default())
}

/// Convert a value with explicit classification options.
pub fn convert_with<'a>(value: impl Into<Option<&'a str>>, options: ClassifyOptions) -> TypedValue {
    let raw = value.into();
    let text = prepare(raw, options);
    convert_classified(raw, text, classify_prepared(text))
}

/// Convert a value to a caller-chosen type, ignoring its own classification.
///
/// INTEGER and FLOAT targets fall back to the original text; BOOLEAN, DATE,
/// TIME and DATETIME targets fall back to `Null`.
pub fn convert_as<'a>(value: impl Into<Option<&'a str>>, target: DataType) -> TypedValue {
    convert_as_with(value, target, ClassifyOptions::default())
}

/// Forced conversion with explicit options. Without trimming, padded
/// values do not match any numeric, boolean or temporal target.
pub fn convert_as_with<'a>(
    value: impl Into<Option<&'a str>>,
    target: DataType,
    options: ClassifyOptions,
) -> TypedValue {
    let raw = value.into();
    let text = prepare(raw, options);
    let original = || TypedValue::Text(raw.unwrap_or_default().to_string());

    match target {
        DataType::Integer => integer_value(text).unwrap_or_else(original),
        DataType::Float => float_value(text).map_or_else(original, TypedValue::Float),
        DataType::Boolean => bool_token(text).map_or(TypedValue::Null, TypedValue::Boolean),
        DataType::Date => parse_date(text).map_or(TypedValue::Null, TypedValue::Date),
        DataType::Time => parse_time(text).map_or(TypedValue::Null, TypedValue::Time),
        DataType::DateTime => parse_datetime(text).map_or(TypedValue::Null, TypedValue::DateTime),
        DataType::None => TypedValue::Null,
        DataType::Empty | DataType::String | DataType::Mixed => original(),
    }
}

/// Dispatch on a classification already computed for `text`.
fn convert_classified(raw: Option<&str>, text: &str, data_type: DataType) -> TypedValue {
    let original = || TypedValue::Text(raw.unwrap_or_default().to_string());

    match data_type {
        DataType::None => TypedValue::Null,
        DataType::Empty => TypedValue::Text(String::new()),
        DataType::Boolean => bool_token(text).map_or(TypedValue::Null, TypedValue::Boolean),
        DataType::Integer => integer_value(text).unwrap_or_else(original),
        DataType::Float => float_value(text).map_or_else(original, TypedValue::Float),
        DataType::Date => parse_date(text).map_or(TypedValue::Null, TypedValue::Date),
        DataType::Time => parse_time(text).map_or(TypedValue::Null, TypedValue::Time),
        DataType::DateTime => parse_datetime(text).map_or(TypedValue::Null, TypedValue::DateTime),
        DataType::String | DataType::Mixed => original(),
    }
}

/// `Integer` when the value fits `i64`, `BigInteger` otherwise.
fn integer_value(text: &str) -> Option<TypedValue> {
    if !matches_integer(text) {
        return None;
    }
    match text.parse::<i64>() {
        Ok(i) => Some(TypedValue::Integer(i)),
        Err(_) => parse_big_int(text).map(TypedValue::BigInteger),
    }
}

fn parse_big_int(text: &str) -> Option<BigInt> {
    text.strip_prefix('+').unwrap_or(text).parse().ok()
}

fn float_value(text: &str) -> Option<f64> {
    if !(matches_float(text) || matches_integer(text)) {
        return None;
    }
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

/// Base-10 integer with optional sign; leading zeros are ignored.
///
/// `None` for non-integer shapes and for values outside `i64`; see
/// [`to_big_int`] for those.
pub fn to_int(value: &str) -> Option<i64> {
    let text = value.trim();
    if !matches_integer(text) {
        return None;
    }
    text.parse().ok()
}

/// Base-10 integer of any size.
pub fn to_big_int(value: &str) -> Option<BigInt> {
    let text = value.trim();
    if !matches_integer(text) {
        return None;
    }
    parse_big_int(text)
}

/// Float or integer shape as a finite `f64`.
pub fn to_float(value: &str) -> Option<f64> {
    float_value(value.trim())
}

/// `true`/`yes`/`1` and `false`/`no`/`0`, case-insensitive.
pub fn to_bool(value: &str) -> Option<bool> {
    bool_token(value.trim())
}

pub fn to_date(value: &str) -> Option<NaiveDate> {
    parse_date(value.trim())
}

pub fn to_time(value: &str) -> Option<NaiveTime> {
    parse_time(value.trim())
}

pub fn to_datetime(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_convert_integers() {
        assert_eq!(convert("123"), TypedValue::Integer(123));
        assert_eq!(convert("-456"), TypedValue::Integer(-456));
        assert_eq!(convert("+789"), TypedValue::Integer(789));
        assert_eq!(convert("00123"), TypedValue::Integer(123));
    }

    #[test]
    fn test_convert_floats() {
        assert_eq!(convert("123.45"), TypedValue::Float(123.45));
        assert_eq!(convert("-456.78"), TypedValue::Float(-456.78));
        assert_eq!(convert("00123.4500"), TypedValue::Float(123.45));
        assert_eq!(convert("1.5e3"), TypedValue::Float(1500.0));
    }

    #[test]
    fn test_convert_booleans() {
        assert_eq!(convert("true"), TypedValue::Boolean(true));
        assert_eq!(convert("False"), TypedValue::Boolean(false));
        assert_eq!(convert("YES"), TypedValue::Boolean(true));
        assert_eq!(convert("1"), TypedValue::Boolean(true));
        assert_eq!(convert("0"), TypedValue::Boolean(false));
    }

    #[test]
    fn test_convert_temporal() {
        assert_eq!(convert("2023-01-01"), TypedValue::Date(ymd(2023, 1, 1)));
        assert_eq!(
            convert("14:30:00"),
            TypedValue::Time(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
        let dt = convert("2023-01-01T12:00:00").as_datetime().unwrap();
        assert_eq!(dt.date(), ymd(2023, 1, 1));
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_convert_placeholders() {
        assert_eq!(convert("none"), TypedValue::Null);
        assert_eq!(convert("NULL"), TypedValue::Null);
        assert_eq!(convert(""), TypedValue::Text(String::new()));
        assert_eq!(convert("   "), TypedValue::Text(String::new()));
        assert_eq!(convert(None), TypedValue::Text(String::new()));
    }

    #[test]
    fn test_convert_strings_unchanged() {
        assert_eq!(convert("hello"), TypedValue::Text("hello".into()));
        assert_eq!(convert("  hello  "), TypedValue::Text("  hello  ".into()));
        assert_eq!(convert("2023-02-30"), TypedValue::Text("2023-02-30".into()));
    }

    #[test]
    fn test_integers_beyond_i64() {
        let huge = "99999999999999999999";
        assert_eq!(classify_prepared(huge), DataType::Integer);
        let expected: BigInt = huge.parse().unwrap();
        assert_eq!(convert(huge), TypedValue::BigInteger(expected.clone()));
        assert_eq!(convert("+0099999999999999999999"), TypedValue::BigInteger(expected));

        let negative = convert("-12345678901234567890");
        assert_eq!(negative.data_type(), DataType::Integer);
        assert_eq!(negative.as_big_int().unwrap().to_string(), "-12345678901234567890");

        assert_eq!(convert("9223372036854775807"), TypedValue::Integer(i64::MAX));
        assert_eq!(convert("-9223372036854775808"), TypedValue::Integer(i64::MIN));
        assert_eq!(
            convert_as("9223372036854775808", DataType::Integer).as_big_int(),
            Some(BigInt::from(i64::MAX) + 1)
        );
    }

    #[test]
    fn test_infinite_floats_fall_back_to_text() {
        assert_eq!(convert("1.0e999"), TypedValue::Text("1.0e999".into()));
    }

    #[test]
    fn test_convert_with_no_trim() {
        let raw = ClassifyOptions { trim: false };
        assert_eq!(convert_with(" 12 ", raw), TypedValue::Text(" 12 ".into()));
        assert_eq!(convert_with("12", raw), TypedValue::Integer(12));
    }

    #[test]
    fn test_convert_as_fallbacks() {
        assert_eq!(convert_as("abc", DataType::Integer), TypedValue::Text("abc".into()));
        assert_eq!(convert_as("12.5", DataType::Integer), TypedValue::Text("12.5".into()));
        assert_eq!(convert_as("abc", DataType::Float), TypedValue::Text("abc".into()));
        assert_eq!(convert_as("abc", DataType::Boolean), TypedValue::Null);
        assert_eq!(convert_as("abc", DataType::Date), TypedValue::Null);
        assert_eq!(convert_as("abc", DataType::Time), TypedValue::Null);
        assert_eq!(convert_as("abc", DataType::DateTime), TypedValue::Null);
        assert_eq!(convert_as("abc", DataType::None), TypedValue::Null);
        assert_eq!(convert_as("abc", DataType::Mixed), TypedValue::Text("abc".into()));
    }

    #[test]
    fn test_convert_as_with_no_trim() {
        let raw = ClassifyOptions { trim: false };
        assert_eq!(
            convert_as_with(" 12 ", DataType::Integer, raw),
            TypedValue::Text(" 12 ".into())
        );
        assert_eq!(convert_as_with(" yes ", DataType::Boolean, raw), TypedValue::Null);
        assert_eq!(convert_as_with("12", DataType::Integer, raw), TypedValue::Integer(12));
        assert_eq!(
            convert_as_with(" 12 ", DataType::Integer, ClassifyOptions::default()),
            TypedValue::Integer(12)
        );
    }

    #[test]
    fn test_convert_as_reaches_shadowed_layouts() {
        assert_eq!(convert_as("20230101", DataType::Date), TypedValue::Date(ymd(2023, 1, 1)));
        assert_eq!(
            convert_as("143000", DataType::Time),
            TypedValue::Time(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
        assert_eq!(convert_as("1", DataType::Integer), TypedValue::Integer(1));
        assert_eq!(convert_as("123", DataType::Float), TypedValue::Float(123.0));
        assert_eq!(convert_as("42", DataType::String), TypedValue::Text("42".into()));
    }

    #[test]
    fn test_typed_helpers() {
        assert_eq!(to_int("abc"), None);
        assert_eq!(to_int("123.45"), None);
        assert_eq!(to_int("99999999999999999999"), None);
        assert_eq!(
            to_big_int(" 99999999999999999999 ").map(|b| b.to_string()),
            Some("99999999999999999999".to_string())
        );
        assert_eq!(to_big_int("-007"), Some(BigInt::from(-7)));
        assert_eq!(to_big_int("1.5"), None);
        assert_eq!(to_float(""), None);
        assert_eq!(to_bool("maybe"), None);
        assert_eq!(to_date("01/01/2023"), Some(ymd(2023, 1, 1)));
        assert_eq!(to_time("25:00:00"), None);
        assert_eq!(to_datetime("2023-02-30T12:00:00"), None);
    }
}
