#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: schema descriptor loading from JSON.
//
// Catches bugs in:
// - Kind tags given as numbers or names
// - Negative sizes and lengths
// - Deeply nested element types
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = ssz_types::Schema::from_json(text);
});
