//! Reduce many classifications to one dominant type.
//!
//! EMPTY and NONE values are skipped. The first typed value sets the
//! dominant type; any later value of a different type makes the result
//! MIXED, and MIXED is terminal. A sequence with nothing typed also
//! profiles as MIXED.
//!
//! Textual `"0"`/`"1"` classify as BOOLEAN but fold alongside INTEGER
//! values too, so `["1", "2", "3"]` profiles as INTEGER while
//! `["1", "0"]` stays BOOLEAN.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::classifier::{ClassifyOptions, classify_with, is_digit_token, prepare};
use crate::error::{Result, TypesiftError};
use crate::schema::{DataType, TypedValue};

/// Sequences at or above this many values are profiled incrementally.
pub const DEFAULT_INCREMENTAL_THRESHOLD: usize = 10_000;

/// Environment variable read once to override the threshold.
pub const THRESHOLD_ENV_VAR: &str = "TYPESIFT_INCREMENTAL_THRESHOLD";

static INCREMENTAL_THRESHOLD: Lazy<usize> = Lazy::new(|| match std::env::var(THRESHOLD_ENV_VAR) {
    Ok(raw) => parse_threshold(&raw).unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            default = DEFAULT_INCREMENTAL_THRESHOLD,
            "ignoring {THRESHOLD_ENV_VAR}"
        );
        DEFAULT_INCREMENTAL_THRESHOLD
    }),
    Err(_) => DEFAULT_INCREMENTAL_THRESHOLD,
});

/// Process-wide incremental threshold.
pub fn incremental_threshold() -> usize {
    *INCREMENTAL_THRESHOLD
}

/// Parse a threshold override.
pub fn parse_threshold(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| TypesiftError::InvalidThreshold(raw.to_string()))
}

// =============================================================================
// CLASSIFIABLE VALUES
// =============================================================================

/// A value the profiler can type.
///
/// Strings are classified; native values are already typed and map
/// straight to their `DataType`.
pub trait Classifiable {
    fn profile_type(&self, options: ClassifyOptions) -> DataType;

    /// Whether this value is the text `"0"` or `"1"`.
    fn is_digit_token(&self, _options: ClassifyOptions) -> bool {
        false
    }
}

impl Classifiable for str {
    fn profile_type(&self, options: ClassifyOptions) -> DataType {
        classify_with(self, options)
    }

    fn is_digit_token(&self, options: ClassifyOptions) -> bool {
        is_digit_token(prepare(Some(self), options))
    }
}

impl Classifiable for String {
    fn profile_type(&self, options: ClassifyOptions) -> DataType {
        self.as_str().profile_type(options)
    }

    fn is_digit_token(&self, options: ClassifyOptions) -> bool {
        self.as_str().is_digit_token(options)
    }
}

impl<T: Classifiable + ?Sized> Classifiable for &T {
    fn profile_type(&self, options: ClassifyOptions) -> DataType {
        (**self).profile_type(options)
    }

    fn is_digit_token(&self, options: ClassifyOptions) -> bool {
        (**self).is_digit_token(options)
    }
}

/// Absence classifies like an absent string: EMPTY.
impl<T: Classifiable> Classifiable for Option<T> {
    fn profile_type(&self, options: ClassifyOptions) -> DataType {
        match self {
            Some(value) => value.profile_type(options),
            None => classify_with(None, options),
        }
    }

    fn is_digit_token(&self, options: ClassifyOptions) -> bool {
        self.as_ref().is_some_and(|v| v.is_digit_token(options))
    }
}

impl Classifiable for TypedValue {
    fn profile_type(&self, options: ClassifyOptions) -> DataType {
        match self {
            TypedValue::Text(s) => s.profile_type(options),
            other => other.data_type(),
        }
    }

    fn is_digit_token(&self, options: ClassifyOptions) -> bool {
        match self {
            TypedValue::Text(s) => s.is_digit_token(options),
            _ => false,
        }
    }
}

macro_rules! native_classifiable {
    ($data_type:expr => $($ty:ty),+) => {
        $(
            impl Classifiable for $ty {
                fn profile_type(&self, _options: ClassifyOptions) -> DataType {
                    $data_type
                }
            }
        )+
    };
}

native_classifiable!(DataType::Integer => i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);
native_classifiable!(DataType::Float => f32, f64);
native_classifiable!(DataType::Boolean => bool);
native_classifiable!(DataType::Date => NaiveDate);
native_classifiable!(DataType::Time => NaiveTime);
native_classifiable!(DataType::DateTime => NaiveDateTime);

// =============================================================================
// FOLD
// =============================================================================

/// One value as the fold sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observation {
    /// EMPTY or NONE.
    Skip,
    /// Textual `"0"`/`"1"`.
    DigitToken,
    Typed(DataType),
}

impl Observation {
    fn of<T: Classifiable + ?Sized>(value: &T, options: ClassifyOptions) -> (DataType, Self) {
        let data_type = value.profile_type(options);
        let observation = if data_type.is_placeholder() {
            Observation::Skip
        } else if data_type == DataType::Boolean && value.is_digit_token(options) {
            Observation::DigitToken
        } else {
            Observation::Typed(data_type)
        };
        (data_type, observation)
    }
}

/// Fold accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dominant {
    Unset,
    /// Only digit tokens so far.
    DigitTokens,
    Settled(DataType),
    Mixed,
}

impl Dominant {
    fn absorb(self, observation: Observation, widen_numeric: bool) -> Self {
        match (self, observation) {
            (Dominant::Mixed, _) | (_, Observation::Skip) => self,
            (Dominant::Unset | Dominant::DigitTokens, Observation::DigitToken) => {
                Dominant::DigitTokens
            }
            (Dominant::Unset, Observation::Typed(t)) => Dominant::Settled(t),
            (Dominant::DigitTokens, Observation::Typed(t))
            | (Dominant::Settled(t), Observation::DigitToken) => {
                if accepts_digit_tokens(t, widen_numeric) {
                    Dominant::Settled(t)
                } else {
                    Dominant::Mixed
                }
            }
            (Dominant::Settled(current), Observation::Typed(next)) => {
                merge(current, next, widen_numeric).map_or(Dominant::Mixed, Dominant::Settled)
            }
        }
    }

    fn resolve(self) -> DataType {
        match self {
            Dominant::Unset | Dominant::Mixed => DataType::Mixed,
            Dominant::DigitTokens => DataType::Boolean,
            Dominant::Settled(t) => t,
        }
    }
}

fn accepts_digit_tokens(data_type: DataType, widen_numeric: bool) -> bool {
    match data_type {
        DataType::Boolean | DataType::Integer => true,
        DataType::Float => widen_numeric,
        _ => false,
    }
}

fn merge(current: DataType, next: DataType, widen_numeric: bool) -> Option<DataType> {
    if current == next {
        Some(current)
    } else if widen_numeric && current.is_numeric() && next.is_numeric() {
        Some(DataType::Float)
    } else {
        None
    }
}

/// The one fold both strategies share. With `short_circuit`, consumption
/// stops as soon as the result is MIXED.
fn fold<I>(observations: I, short_circuit: bool, widen_numeric: bool) -> DataType
where
    I: Iterator<Item = Observation>,
{
    let mut dominant = Dominant::Unset;
    for (index, observation) in observations.enumerate() {
        dominant = dominant.absorb(observation, widen_numeric);
        if short_circuit && dominant == Dominant::Mixed {
            tracing::trace!(consumed = index + 1, "profile is MIXED, stopping early");
            break;
        }
    }
    dominant.resolve()
}

// =============================================================================
// PROFILER
// =============================================================================

/// How a sequence is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Classify everything up front, then fold.
    Eager,
    /// Fold while consuming, stopping at MIXED.
    Incremental,
}

/// Profiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilerConfig {
    /// Known sizes below this are profiled eagerly.
    pub incremental_threshold: usize,
    /// Options for classifying textual values.
    pub classify: ClassifyOptions,
    /// Fold INTEGER and FLOAT together as FLOAT instead of MIXED.
    pub widen_numeric: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            incremental_threshold: incremental_threshold(),
            classify: ClassifyOptions::default(),
            widen_numeric: false,
        }
    }
}

/// Folds sequences of values into a dominant type.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Pick a strategy from an iterator size hint. Only an exact size
    /// below the threshold is profiled eagerly.
    pub fn strategy_for(&self, size_hint: (usize, Option<usize>)) -> Strategy {
        match size_hint {
            (lower, Some(upper)) if lower == upper && upper < self.config.incremental_threshold => {
                Strategy::Eager
            }
            _ => Strategy::Incremental,
        }
    }

    /// Dominant type of a sequence.
    pub fn profile<I>(&self, values: I) -> DataType
    where
        I: IntoIterator,
        I::Item: Classifiable,
    {
        let values = values.into_iter();
        let strategy = self.strategy_for(values.size_hint());
        let options = self.config.classify;
        let widen = self.config.widen_numeric;
        let observe = |value: I::Item| Observation::of(&value, options).1;

        tracing::debug!(?strategy, size_hint = ?values.size_hint(), "profiling values");

        match strategy {
            Strategy::Eager => {
                let observed: Vec<Observation> = values.map(observe).collect();
                fold(observed.into_iter(), false, widen)
            }
            Strategy::Incremental => fold(values.map(observe), true, widen),
        }
    }

    /// Per-type counts over the whole sequence, plus its dominant type.
    ///
    /// Every value is consumed; there is no early stop.
    pub fn distribution<I>(&self, values: I) -> TypeDistribution
    where
        I: IntoIterator,
        I::Item: Classifiable,
    {
        let options = self.config.classify;
        let widen = self.config.widen_numeric;
        let mut counts: IndexMap<DataType, usize> = IndexMap::new();
        let mut total = 0;

        let dominant = fold(
            values.into_iter().map(|value| {
                let (data_type, observation) = Observation::of(&value, options);
                *counts.entry(data_type).or_insert(0) += 1;
                total += 1;
                observation
            }),
            false,
            widen,
        );

        TypeDistribution {
            counts,
            total,
            dominant,
        }
    }
}

/// How many values of each type a sequence held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDistribution {
    /// Counts in order of first appearance.
    counts: IndexMap<DataType, usize>,
    total: usize,
    dominant: DataType,
}

impl TypeDistribution {
    /// Number of values seen.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, data_type: DataType) -> usize {
        self.counts.get(&data_type).copied().unwrap_or(0)
    }

    /// Fraction of values with this type (0.0 for an empty sequence).
    pub fn share(&self, data_type: DataType) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(data_type) as f64 / self.total as f64
        }
    }

    /// Dominant type under the same rules as [`Profiler::profile`].
    pub fn dominant(&self) -> DataType {
        self.dominant
    }

    /// Types and counts in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (DataType, usize)> + '_ {
        self.counts.iter().map(|(t, c)| (*t, *c))
    }
}
