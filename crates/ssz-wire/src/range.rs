use std::fmt;

use crate::chunk::chunk_count;

/// Half-open byte interval `[start, end)` into a source buffer.
///
/// Ranges are produced by the canonical parser, one per element or
/// field, in schema order. Ranges of one value never overlap. A fixed
/// field that follows a variable one lies earlier in the buffer, so only
/// layouts without offsets are guaranteed to ascend in `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Create a range. `start` must not exceed `end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Range of `len` bytes beginning at `start`.
    #[must_use]
    pub const fn with_len(start: usize, len: usize) -> Self {
        Self::new(start, start + len)
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Number of 32-byte chunks this range contributes.
    #[must_use]
    pub fn chunk_count(self) -> usize {
        chunk_count(self.len())
    }

    /// Borrow the bytes this range covers, or `None` if it lies
    /// outside `buf`.
    #[must_use]
    pub fn slice(self, buf: &[u8]) -> Option<&[u8]> {
        buf.get(self.start..self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_chunks() {
        let r = ByteRange::new(4, 40);
        assert_eq!(r.len(), 36);
        assert_eq!(r.chunk_count(), 2);
        assert!(!r.is_empty());
    }

    #[test]
    fn empty_range_has_no_chunks() {
        let r = ByteRange::new(7, 7);
        assert!(r.is_empty());
        assert_eq!(r.chunk_count(), 0);
    }

    #[test]
    fn with_len() {
        assert_eq!(ByteRange::with_len(8, 8), ByteRange::new(8, 16));
    }

    #[test]
    fn slice_in_and_out_of_bounds() {
        let buf = [1u8, 2, 3, 4];
        assert_eq!(ByteRange::new(1, 3).slice(&buf), Some(&buf[1..3]));
        assert_eq!(ByteRange::new(2, 5).slice(&buf), None);
    }

    #[test]
    fn display_is_half_open() {
        assert_eq!(ByteRange::new(0, 8).to_string(), "[0, 8)");
    }
}
