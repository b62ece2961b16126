use ssz_wire::chunk::pad_chunk;
use ssz_wire::{ByteRange, Chunk, BYTES_PER_CHUNK};

/// Slice-mode chunk streamer.
///
/// Walks the ranges of a parsed [`Layout`](crate::Layout) over a fully
/// materialized buffer and yields one 32-byte chunk per stride. The last
/// stride of each range is right-padded with zeros; an empty range
/// yields nothing. Chunks never straddle two ranges.
///
/// ```text
///   range [0, 40)   → chunk(0..32), chunk(32..40 ++ 0×24)
///   range [40, 40)  → (none)
///   range [40, 48)  → chunk(40..48 ++ 0×24)
/// ```
///
/// Ranges are expected to come from the parser and lie inside `buf`.
/// A range that does not contributes no chunks.
pub struct SliceChunks<'a> {
    buf: &'a [u8],
    ranges: std::slice::Iter<'a, ByteRange>,
    rest: &'a [u8],
}

impl<'a> SliceChunks<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8], ranges: &'a [ByteRange]) -> Self {
        Self {
            buf,
            ranges: ranges.iter(),
            rest: &[],
        }
    }
}

impl Iterator for SliceChunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        while self.rest.is_empty() {
            let range = self.ranges.next()?;
            self.rest = range.slice(self.buf).unwrap_or_default();
        }

        let take = self.rest.len().min(BYTES_PER_CHUNK);
        let (stride, rest) = self.rest.split_at(take);
        self.rest = rest;
        Some(pad_chunk(stride))
    }
}
