#![no_main]

use libfuzzer_sys::fuzz_target;
use rbit_bencode::bencode::{decode, encode, DecodeConfig};

// Decoding arbitrary bytes must never panic, and whatever decodes must
// re-encode canonically.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = decode(data, &DecodeConfig::strict()) {
        assert_eq!(encode(&value), data, "strict input must already be canonical");
    }

    let lenient = DecodeConfig::lenient().with_trailing_data(true);
    if let Ok(value) = decode(data, &lenient) {
        let normalized = encode(&value);
        let reparsed = decode(&normalized, &DecodeConfig::strict())
            .expect("normalized output must decode strictly");
        assert_eq!(reparsed, value);
    }
});
