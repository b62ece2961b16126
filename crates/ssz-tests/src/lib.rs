//! Shared fixtures for the integration tests and benches.
//!
//! Builders produce canonical encodings for the schemas under test, and
//! [`reference_root`] recomputes a root the slow way: materialize every
//! chunk, pad the list to a power of two, hash level by level.

#![allow(clippy::pedantic)]

use ssz_decoder::{CanonicalParser, PullFn};
use ssz_merkle::{Hasher, Sha256Hasher};
use ssz_types::Schema;
use ssz_wire::chunk::{length_chunk, pad_chunk};
use ssz_wire::offset::write_offset;
use ssz_wire::{Chunk, ZERO_CHUNK};

/// Concatenate little-endian `u64` values.
pub fn u64_list(values: impl IntoIterator<Item = u64>) -> Vec<u8> {
    values.into_iter().flat_map(u64::to_le_bytes).collect()
}

/// Container value: fixed parts in order, then one offset per variable
/// part, then the variable payloads.
///
/// `fields` pairs each payload with whether its schema is fixed-size.
pub fn container_bytes(fields: &[(bool, &[u8])]) -> Vec<u8> {
    let header: usize = fields
        .iter()
        .map(|(fixed, data)| if *fixed { data.len() } else { 4 })
        .sum();
    let mut head = Vec::new();
    let mut tail = Vec::new();
    for (fixed, data) in fields {
        if *fixed {
            head.extend_from_slice(data);
        } else {
            write_offset((header + tail.len()) as u32, &mut head);
            tail.extend_from_slice(data);
        }
    }
    head.extend(tail);
    head
}

/// A byte source that hands out at most `step` bytes per call.
pub fn trickle(data: &[u8], step: usize) -> PullFn<impl FnMut(&mut [u8]) -> usize + '_> {
    let mut pos = 0;
    PullFn::new(move |buf: &mut [u8]| {
        let n = buf.len().min(step).min(data.len() - pos);
        buf[..n].copy_from_slice(&data[pos..pos + n]);
        pos += n;
        n
    })
}

/// Root computed without the incremental merkleizer.
///
/// Panics if `bytes` does not parse; callers pass valid values only.
pub fn reference_root(schema: &Schema, bytes: &[u8]) -> Chunk {
    let layout = CanonicalParser::parse(schema, bytes).expect("reference input must be canonical");
    let mut leaves: Vec<Chunk> = Vec::new();
    for range in &layout.ranges {
        for stride in bytes[range.start..range.end].chunks(32) {
            leaves.push(pad_chunk(stride));
        }
    }
    let root = padded_tree_root(&leaves);
    match layout.length_mixin {
        Some(len) => Sha256Hasher.hash_parent(&root, &length_chunk(len)),
        None => root,
    }
}

/// Root of `leaves` zero-padded to the next power of two.
pub fn padded_tree_root(leaves: &[Chunk]) -> Chunk {
    if leaves.is_empty() {
        return ZERO_CHUNK;
    }
    let mut level = leaves.to_vec();
    level.resize(leaves.len().next_power_of_two(), ZERO_CHUNK);
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| Sha256Hasher.hash_parent(&pair[0], &pair[1]))
            .collect();
    }
    level[0]
}
