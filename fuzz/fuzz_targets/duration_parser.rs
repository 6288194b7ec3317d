#![no_main]

use decodestat::duration::parse_duration;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any accepted value must be a finite, non-negative microsecond count
        if let Ok(micros) = parse_duration(input) {
            assert!(micros.as_f64().is_finite());
            assert!(micros.as_f64() >= 0.0);
        }
    }
});
