//! Fuzz target for delimiter detection and table profiling.

#![no_main]

use libfuzzer_sys::fuzz_target;
use typesift::TableProfiler;

fuzz_target!(|data: &[u8]| {
    if data.len() > 50_000 {
        return;
    }

    // Errors are fine, panics are not
    if let Ok(profile) = TableProfiler::new().profile_bytes(data) {
        for column in &profile.columns {
            assert_eq!(column.distribution.total(), profile.row_count);
        }
    }
});
