#![no_main]

//! Fuzz target for settings files
//!
//! Arbitrary bytes must either fail to parse or produce a run configuration
//! or a `ConfigError`, never a panic.

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use itemtrail::settings::{Overrides, RunConfig, Settings};

fuzz_target!(|data: &[u8]| {
    let Ok(settings) = serde_json::from_slice::<Settings>(data) else {
        return;
    };
    let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
    let _ = RunConfig::from_settings(settings, Overrides::default(), now);
});
