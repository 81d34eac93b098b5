//! Fuzz testing for the statement sanitizer.
//!
//! Drives `sanitize` with arbitrary UTF-8 to hold the engine to its
//! contract: total (no panics on any input), deterministic (same output on
//! repeated calls), and placeholder-only shrinkage (the sanitized text is
//! never longer than the input).

#![no_main]

use libfuzzer_sys::fuzz_target;

use sqlscrub::sanitize;

fuzz_target!(|data: &[u8]| {
    let Ok(sql) = std::str::from_utf8(data) else {
        return;
    };

    let first = sanitize(sql);
    let second = sanitize(sql);
    assert_eq!(first, second);

    assert!(first.sanitized_sql().len() <= sql.len());
    assert!(first.summary().len() <= sql.len() + 1);
});
