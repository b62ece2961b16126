#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: decode_bitlist_len sentinel handling.
//
// Any accepted input must report a bit length that fits in the bytes
// it came from.
fuzz_target!(|data: &[u8]| {
    if let Ok(bits) = ssz_wire::bitlist::decode_bitlist_len(data) {
        assert!(bits < data.len() as u64 * 8);
    }
});
