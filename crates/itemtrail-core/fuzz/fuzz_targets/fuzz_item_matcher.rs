#![no_main]

use itemtrail_core::{ItemMatcher, MatchMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (items, message) = text.split_once('\n').unwrap_or((text, text));
    let items: Vec<&str> = items.split(',').collect();

    for mode in [MatchMode::Strict, MatchMode::Literal] {
        let matcher = ItemMatcher::new(&items, mode);
        if let Some(found) = matcher.find_match(message) {
            assert!(!found.is_empty());
            assert!(message.contains(found));
        }
    }
});
