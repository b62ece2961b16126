#![no_main]

use libfuzzer_sys::fuzz_target;
use ssz_driver::{
    compute_root_from_reader, compute_root_from_slice, ReaderMode, RootConfig, RootDriver,
};
use ssz_types::Schema;

fn trickle(value: &[u8], step: usize) -> impl FnMut(&mut [u8]) -> usize + '_ {
    let mut pos = 0;
    move |buf: &mut [u8]| {
        let n = buf.len().min(step).min(value.len() - pos);
        buf[..n].copy_from_slice(&value[pos..pos + n]);
        pos += n;
        n
    }
}

// Fuzz target: the reader paths agree with the slice path.
//
// Input format:
//   byte 0: schema selector
//   byte 1: bytes handed out per pull (0 is treated as 1)
//   bytes 2..: value
//
// The buffered reader, the streaming reader, and the slice path must
// accept the same inputs, produce the same root, and fail with the same
// error kind.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let schema = match data[0] % 8 {
        0 => Schema::basic(32),
        1 => Schema::vector(Schema::basic(4)),
        2 => Schema::list(Schema::basic(8)),
        3 => Schema::list(Schema::bytes()),
        4 => Schema::container(vec![Schema::basic(8), Schema::bytes()]),
        5 => Schema::basic(usize::from(data[1]) + 1),
        6 => Schema::container(vec![Schema::basic(8), Schema::basic(3), Schema::basic(40)]),
        _ => Schema::bitlist(),
    };
    let step = usize::from(data[1].max(1));
    let value = &data[2..];

    let from_slice = compute_root_from_slice(&schema, value).map_err(|e| e.kind());

    let from_reader =
        compute_root_from_reader(&schema, trickle(value, step)).map_err(|e| e.kind());

    let streaming = RootDriver::new().with_config(RootConfig {
        reader_mode: ReaderMode::Streaming,
        staging_capacity: 32,
        ..RootConfig::default()
    });
    let from_stream = streaming
        .root_from_pull(&schema, trickle(value, step))
        .map_err(|e| e.kind());

    assert_eq!(from_slice, from_reader, "slice vs buffered reader");
    assert_eq!(from_slice, from_stream, "slice vs streaming reader");
});
