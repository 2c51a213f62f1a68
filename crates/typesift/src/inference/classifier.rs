//! Single-value classification.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! NONE, EMPTY, BOOLEAN, INTEGER, FLOAT, DATE, TIME, DATETIME, then STRING.
//! The order settles the overlapping shapes: `"1"`/`"0"` are booleans, and
//! 8-digit dates or 6-digit times are integers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::temporal::{parse_date, parse_datetime, parse_time};
use crate::schema::DataType;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// Plain decimal notation: integer or float shape without an exponent.
static NUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap());

const NONE_TOKENS: &[&str] = &["none", "null"];
const TRUE_TOKENS: &[&str] = &["true", "1", "yes"];
const FALSE_TOKENS: &[&str] = &["false", "0", "no"];

/// Options applied before the rules are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Trim surrounding whitespace first. With `false`, `"  12  "` is a
    /// STRING and `"   "` is not EMPTY.
    pub trim: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self { trim: true }
    }
}

/// Trim a raw value; absence stays absent.
pub fn normalize(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
}

/// Text the rules see: normalized when asked, absence as the empty string.
pub(crate) fn prepare(raw: Option<&str>, options: ClassifyOptions) -> &str {
    let text = if options.trim { normalize(raw) } else { raw };
    text.unwrap_or("")
}

/// Classify a value with default options.
///
/// Accepts a `&str` or an `Option<&str>`; `None` classifies as EMPTY.
pub fn classify<'a>(value: impl Into<Option<&'a str>>) -> DataType {
    classify_with(value, ClassifyOptions::default())
}

/// Classify a value with explicit options.
pub fn classify_with<'a>(value: impl Into<Option<&'a str>>, options: ClassifyOptions) -> DataType {
    classify_prepared(prepare(value.into(), options))
}

/// True iff [`classify`] returns anything other than STRING.
pub fn can_classify_beyond_string<'a>(value: impl Into<Option<&'a str>>) -> bool {
    classify(value) != DataType::String
}

/// Run the precedence chain over already-prepared text.
pub(crate) fn classify_prepared(text: &str) -> DataType {
    if matches_none(text) {
        DataType::None
    } else if text.is_empty() {
        DataType::Empty
    } else if bool_token(text).is_some() {
        DataType::Boolean
    } else if INTEGER_PATTERN.is_match(text) {
        DataType::Integer
    } else if FLOAT_PATTERN.is_match(text) {
        DataType::Float
    } else if parse_date(text).is_some() {
        DataType::Date
    } else if parse_time(text).is_some() {
        DataType::Time
    } else if parse_datetime(text).is_some() {
        DataType::DateTime
    } else {
        DataType::String
    }
}

fn matches_none(text: &str) -> bool {
    NONE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t))
}

/// Boolean reading of a token, if it is one.
pub(crate) fn bool_token(text: &str) -> Option<bool> {
    if TRUE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

/// `"0"` and `"1"` read as booleans but also as integers.
pub(crate) fn is_digit_token(text: &str) -> bool {
    text == "0" || text == "1"
}

pub(crate) fn matches_integer(text: &str) -> bool {
    INTEGER_PATTERN.is_match(text)
}

pub(crate) fn matches_float(text: &str) -> bool {
    FLOAT_PATTERN.is_match(text)
}

// =============================================================================
// SHAPE PREDICATES
// =============================================================================
// Each predicate trims its input and ignores precedence, e.g.
// `is_date_like("20230101")` holds although `classify` says INTEGER.

pub fn is_none_like(value: &str) -> bool {
    matches_none(value.trim())
}

pub fn is_empty_like(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_bool_like(value: &str) -> bool {
    bool_token(value.trim()).is_some()
}

pub fn is_int_like(value: &str) -> bool {
    matches_integer(value.trim())
}

/// Integer-shaped strings are float-like too.
pub fn is_float_like(value: &str) -> bool {
    let text = value.trim();
    matches_float(text) || matches_integer(text)
}

/// Integer or float in plain notation. Exponents are not numeric-like.
pub fn is_numeric_like(value: &str) -> bool {
    NUMERIC_PATTERN.is_match(value.trim())
}

/// Anything that is not numeric-like, including blanks and booleans.
pub fn is_category_like(value: &str) -> bool {
    !is_numeric_like(value)
}

/// Numeric-like with a leading `0` digit (`"0"`, `"0123"`, `"0.5"`).
///
/// Such columns (zip codes, padded IDs) lose information when converted.
pub fn has_leading_zero(value: &str) -> bool {
    let text = value.trim();
    is_numeric_like(text) && text.trim_start_matches(['+', '-']).starts_with('0')
}

pub fn is_date_like(value: &str) -> bool {
    parse_date(value.trim()).is_some()
}

pub fn is_time_like(value: &str) -> bool {
    parse_time(value.trim()).is_some()
}

pub fn is_datetime_like(value: &str) -> bool {
    parse_datetime(value.trim()).is_some()
}
