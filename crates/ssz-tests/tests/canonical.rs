//! Rejection of non-canonical and malformed encodings.
//!
//! Each case checks the closed error kind rather than the exact variant,
//! because the kind is what callers and the command line observe.

use ssz_decoder::ErrorKind;
use ssz_driver::{compute_root_from_reader, compute_root_from_slice};
use ssz_tests::{trickle, u64_list};
use ssz_types::Schema;
use ssz_wire::offset::write_offset;

fn reject(schema: &Schema, bytes: &[u8]) -> ErrorKind {
    match compute_root_from_slice(schema, bytes) {
        Ok(root) => panic!("expected rejection, got root {root}"),
        Err(e) => e.kind(),
    }
}

// ── Fixed sizes ───────────────────────────────────────────────────────────────

#[test]
fn fixed_basic_off_by_one() {
    for n in [1usize, 8, 32, 33] {
        let schema = Schema::basic(n);
        assert_eq!(reject(&schema, &vec![0; n - 1]), ErrorKind::NonCanonical, "N-1, N={n}");
        assert_eq!(reject(&schema, &vec![0; n + 1]), ErrorKind::NonCanonical, "N+1, N={n}");
    }
}

#[test]
fn basic_without_fixed_size() {
    assert_eq!(
        reject(&Schema::Basic { fixed_size: None }, &[1, 2, 3]),
        ErrorKind::UnsupportedType
    );
}

#[test]
fn partial_trailing_element() {
    let mut bytes = u64_list([1, 2]);
    bytes.push(0);
    assert_eq!(reject(&Schema::list(Schema::basic(8)), &bytes), ErrorKind::NonCanonical);
}

#[test]
fn fixed_container_wrong_width() {
    let schema = Schema::container(vec![Schema::basic(8), Schema::basic(4)]);
    assert_eq!(reject(&schema, &[0; 11]), ErrorKind::MalformedHeader);
    assert_eq!(reject(&schema, &[0; 13]), ErrorKind::MalformedHeader);
}

// ── Bitlists ──────────────────────────────────────────────────────────────────

#[test]
fn bitlist_sentinel_rule() {
    let schema = Schema::bitlist();
    assert_eq!(reject(&schema, &[0x00]), ErrorKind::BitlistPadding);
    assert!(compute_root_from_slice(&schema, &[0x10]).is_ok());
    assert_eq!(reject(&schema, &[0x3F]), ErrorKind::BitlistPadding);
}

#[test]
fn empty_bitlist() {
    assert_eq!(reject(&Schema::bitlist(), &[]), ErrorKind::NonCanonical);
}

#[test]
fn bitlist_zero_last_byte_after_data() {
    assert_eq!(reject(&Schema::bitlist(), &[0xFF, 0x00]), ErrorKind::BitlistPadding);
}

// ── Offsets ───────────────────────────────────────────────────────────────────

#[test]
fn container_offsets_out_of_order() {
    let schema = Schema::container(vec![Schema::bytes(), Schema::bytes()]);
    let mut bytes = Vec::new();
    write_offset(20, &mut bytes);
    write_offset(18, &mut bytes);
    bytes.resize(24, 0);
    assert_eq!(reject(&schema, &bytes), ErrorKind::BadOffset);
}

#[test]
fn container_offset_into_header() {
    let schema = Schema::container(vec![Schema::basic(8), Schema::bytes()]);
    let mut bytes = vec![0; 8];
    write_offset(10, &mut bytes);
    bytes.resize(16, 0);
    assert_eq!(reject(&schema, &bytes), ErrorKind::BadOffset);
}

#[test]
fn container_offset_past_end() {
    let schema = Schema::container(vec![Schema::basic(2), Schema::bytes()]);
    let mut bytes = vec![0; 2];
    write_offset(20, &mut bytes);
    bytes.extend_from_slice(&[5; 3]);
    assert_eq!(reject(&schema, &bytes), ErrorKind::LengthOverflow);
}

#[test]
fn container_shorter_than_header() {
    let schema = Schema::container(vec![Schema::basic(8), Schema::bytes()]);
    assert_eq!(reject(&schema, &[0; 11]), ErrorKind::MalformedHeader);
}

#[test]
fn list_table_too_short() {
    let schema = Schema::list(Schema::bytes());
    assert_eq!(reject(&schema, &[4, 0, 0]), ErrorKind::MalformedHeader);
}

#[test]
fn list_table_trailing_payload() {
    let schema = Schema::list(Schema::bytes());
    let bytes = [8, 0, 0, 0, 10, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(reject(&schema, &bytes), ErrorKind::NonCanonical);
}

#[test]
fn list_table_overflow() {
    let schema = Schema::list(Schema::bytes());
    let bytes = [8, 0, 0, 0, 0xFF, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(reject(&schema, &bytes), ErrorKind::LengthOverflow);
}

#[test]
fn list_table_first_offset_mismatch() {
    let schema = Schema::list(Schema::bytes());
    let bytes = [12, 0, 0, 0, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(reject(&schema, &bytes), ErrorKind::BadOffset);
}

#[test]
fn variable_vector_cannot_be_empty() {
    assert_eq!(reject(&Schema::vector(Schema::bytes()), &[]), ErrorKind::MalformedHeader);
}

// ── Reader path ───────────────────────────────────────────────────────────────

#[test]
fn reader_path_reports_parser_errors() {
    let bytes = [0u8; 9];
    let mut source = trickle(&bytes, 2);
    let err = compute_root_from_reader(&Schema::basic(8), |buf: &mut [u8]| {
        std::io::Read::read(&mut source, buf).unwrap_or(0)
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NonCanonical);
}

#[test]
fn unknown_schema_kind_from_json() {
    let err = Schema::from_json(r#"{"kind": 5}"#).unwrap_err();
    assert_eq!(ssz_decoder::DecodeError::from(err).kind(), ErrorKind::UnsupportedType);
}
