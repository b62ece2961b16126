/// Width of a Merkle leaf in bytes.
pub const BYTES_PER_CHUNK: usize = 32;

/// One 32-byte Merkle leaf or interior node.
///
/// Leaves and hashes share the same representation: an opaque byte
/// array, never interpreted as an integer.
pub type Chunk = [u8; BYTES_PER_CHUNK];

/// The all-zero chunk. Root of an empty value and the padding leaf.
pub const ZERO_CHUNK: Chunk = [0u8; BYTES_PER_CHUNK];

/// Copy up to 32 bytes from `bytes` into a right-zero-padded chunk.
///
/// Bytes beyond the first 32 are ignored.
///
/// ```text
///   [0x2A]            → 2A 00 00 .. 00   (31 zero bytes of padding)
///   [0xFF; 32]        → FF FF FF .. FF   (no padding)
/// ```
#[must_use]
pub fn pad_chunk(bytes: &[u8]) -> Chunk {
    let mut chunk = ZERO_CHUNK;
    let n = bytes.len().min(BYTES_PER_CHUNK);
    chunk[..n].copy_from_slice(&bytes[..n]);
    chunk
}

/// Number of chunks a span of `len` bytes occupies.
///
/// A zero-length span occupies no chunks.
#[must_use]
pub fn chunk_count(len: usize) -> usize {
    len.div_ceil(BYTES_PER_CHUNK)
}

/// Encode a length as the 32-byte chunk mixed into a root.
///
/// The length is written as an 8-byte little-endian integer in the
/// first 8 bytes; the remaining 24 bytes are zero.
#[must_use]
pub fn length_chunk(length: u64) -> Chunk {
    let mut chunk = ZERO_CHUNK;
    chunk[..8].copy_from_slice(&length.to_le_bytes());
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_short_input() {
        let chunk = pad_chunk(&[42, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(chunk[0], 42);
        assert!(chunk[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn pad_full_input_is_identity() {
        assert_eq!(pad_chunk(&[0xFF; 32]), [0xFF; 32]);
    }

    #[test]
    fn pad_ignores_excess() {
        let mut input = [0xAA; 40];
        input[32..].fill(0xBB);
        assert_eq!(pad_chunk(&input), [0xAA; 32]);
    }

    #[test]
    fn pad_empty() {
        assert_eq!(pad_chunk(&[]), ZERO_CHUNK);
    }

    #[test]
    fn counts() {
        assert_eq!(chunk_count(0), 0);
        assert_eq!(chunk_count(1), 1);
        assert_eq!(chunk_count(32), 1);
        assert_eq!(chunk_count(33), 2);
        assert_eq!(chunk_count(8000), 250);
    }

    #[test]
    fn length_chunk_layout() {
        let chunk = length_chunk(0x0102_0304_0506);
        assert_eq!(&chunk[..8], &[0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0, 0]);
        assert!(chunk[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn length_zero_is_zero_chunk() {
        assert_eq!(length_chunk(0), ZERO_CHUNK);
    }
}
