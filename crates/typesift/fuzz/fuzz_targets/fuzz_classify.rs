//! Fuzz target for classification, conversion and profiling.
//!
//! Checks that no input panics, that a single value is never MIXED, and
//! that both profiling strategies agree on the same values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use typesift::{DataType, Profiler, ProfilerConfig, classify, convert};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    let data_type = classify(content);
    assert_ne!(data_type, DataType::Mixed);
    let _ = convert(content);

    let values: Vec<&str> = content.split(',').collect();
    let eager = Profiler::with_config(ProfilerConfig {
        incremental_threshold: usize::MAX,
        ..ProfilerConfig::default()
    });
    let incremental = Profiler::with_config(ProfilerConfig {
        incremental_threshold: 0,
        ..ProfilerConfig::default()
    });
    assert_eq!(eager.profile(&values), incremental.profile(&values));
});
