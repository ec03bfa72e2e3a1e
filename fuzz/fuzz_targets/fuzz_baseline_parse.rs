#![no_main]

use libfuzzer_sys::fuzz_target;

use ballotcount_baseline::record::parse_elapsed;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(elapsed) = parse_elapsed(text) {
        assert!(elapsed.as_secs_f64() > 0.0);
    }
});
