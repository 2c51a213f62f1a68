//! Classification, conversion and profiling of raw values.

mod classifier;
mod converter;
mod profiler;
mod temporal;

pub use classifier::{
    ClassifyOptions, can_classify_beyond_string, classify, classify_with, has_leading_zero,
    is_bool_like, is_category_like, is_date_like, is_datetime_like, is_empty_like, is_float_like,
    is_int_like, is_none_like, is_numeric_like, is_time_like, normalize,
};
pub use converter::{
    convert, convert_as, convert_as_with, convert_with, to_big_int, to_bool, to_date, to_datetime,
    to_float, to_int, to_time,
};
pub use profiler::{
    Classifiable, DEFAULT_INCREMENTAL_THRESHOLD, Profiler, ProfilerConfig, Strategy,
    THRESHOLD_ENV_VAR, TypeDistribution, incremental_threshold, parse_threshold,
};
