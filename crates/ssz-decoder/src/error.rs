use std::fmt;

use ssz_types::SchemaError;
use ssz_wire::WireError;

/// Closed classification of every decode failure.
///
/// Each [`DecodeError`] maps onto exactly one kind. The numeric codes
/// are what the command line reports; `0` is reserved for success and
/// has no variant here.
///
/// ```text
/// ┌──────┬─────────────────┬──────────────────────────────────────────┐
/// │ Code │ Kind            │ Raised when                              │
/// ├──────┼─────────────────┼──────────────────────────────────────────┤
/// │ 1    │ BadOffset       │ offsets out of order, into the header,   │
/// │      │                 │ or inconsistent table geometry           │
/// │ 2    │ NonCanonical    │ right shape, wrong exact length          │
/// │ 3    │ BitlistPadding  │ sentinel or padding bits violated        │
/// │ 4    │ UnsupportedType │ incomplete or unknown schema             │
/// │ 5    │ MalformedHeader │ buffer shorter than its header           │
/// │ 6    │ LengthOverflow  │ offset past the end of the buffer        │
/// │ 7    │ UnexpectedEof   │ pull source ran dry mid-span             │
/// └──────┴─────────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadOffset,
    NonCanonical,
    BitlistPadding,
    UnsupportedType,
    MalformedHeader,
    LengthOverflow,
    UnexpectedEof,
}

impl ErrorKind {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::BadOffset => 1,
            ErrorKind::NonCanonical => 2,
            ErrorKind::BitlistPadding => 3,
            ErrorKind::UnsupportedType => 4,
            ErrorKind::MalformedHeader => 5,
            ErrorKind::LengthOverflow => 6,
            ErrorKind::UnexpectedEof => 7,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::BadOffset => "BadOffset",
            ErrorKind::NonCanonical => "NonCanonical",
            ErrorKind::BitlistPadding => "BitlistPadding",
            ErrorKind::UnsupportedType => "UnsupportedType",
            ErrorKind::MalformedHeader => "MalformedHeader",
            ErrorKind::LengthOverflow => "LengthOverflow",
            ErrorKind::UnexpectedEof => "UnexpectedEOF",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors produced while validating a buffer against a schema or
/// streaming its chunks.
///
/// Variants carry the offsets and sizes needed to locate the failure;
/// [`kind`](Self::kind) collapses them onto [`ErrorKind`].
///
/// ```text
///   DecodeError
///   ├── MissingFixedSize        ← Basic schema without fixed_size
///   ├── LengthMismatch          ← fixed Basic, wrong buffer length
///   ├── Misaligned              ← fixed-element sequence, partial element
///   ├── ContainerLength         ← all-fixed container, wrong total width
///   ├── ContainerTrailing       ← all-fixed container, cursor off the end
///   ├── HeaderTooShort          ← buffer shorter than the offset header
///   ├── NoOffsets               ← offset table is empty
///   ├── TableMisaligned         ← first offset ≠ 4 × table entries
///   ├── OffsetsNotIncreasing    ← offset ≤ its predecessor
///   ├── OffsetIntoHeader        ← container offset aliases the header
///   ├── OffsetOverflow          ← offset past the buffer end
///   ├── TrailingBytes           ← bytes after the last referenced span
///   ├── RangeBehindCursor       ← reader asked to seek backwards
///   ├── ReaderEof               ← pull source exhausted mid-range
///   ├── TrailingSource          ← pull source longer than the layout
///   ├── Wire(WireError)         ← from ssz-wire
///   ├── Schema(SchemaError)     ← from ssz-types descriptor loading
///   └── Io(std::io::Error)      ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("basic schema has no fixed_size")]
    MissingFixedSize,

    #[error("expected exactly {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("buffer of {len} bytes is not a multiple of element size {element_size}")]
    Misaligned { len: usize, element_size: usize },

    #[error("container fields are {expected} bytes wide, buffer has {actual}")]
    ContainerLength { expected: usize, actual: usize },

    #[error("container field cursor ended at {cursor}, buffer has {len} bytes")]
    ContainerTrailing { cursor: usize, len: usize },

    #[error("buffer of {len} bytes is shorter than its {header} byte header")]
    HeaderTooShort { len: usize, header: usize },

    #[error("offset table is empty")]
    NoOffsets,

    #[error("first offset {first} does not match a table of {entries} entries")]
    TableMisaligned { first: usize, entries: usize },

    #[error("offset {offset} at index {index} does not exceed previous offset {previous}")]
    OffsetsNotIncreasing {
        index: usize,
        previous: usize,
        offset: usize,
    },

    #[error("offset {offset} of field {field} points into the {header} byte header")]
    OffsetIntoHeader {
        field: usize,
        offset: usize,
        header: usize,
    },

    #[error("offset {offset} exceeds buffer length {len}")]
    OffsetOverflow { offset: usize, len: usize },

    #[error("{extra} trailing bytes after offset {end}")]
    TrailingBytes { end: usize, extra: usize },

    #[error("range {start} lies behind reader position {position}")]
    RangeBehindCursor { start: usize, position: usize },

    #[error("source exhausted at byte {position}, range needs bytes up to {needed}")]
    ReaderEof { position: usize, needed: usize },

    #[error("source has bytes beyond the {len} byte layout")]
    TrailingSource { len: usize },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("unsupported schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// The closed error kind this failure belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MissingFixedSize | DecodeError::Schema(_) => ErrorKind::UnsupportedType,
            DecodeError::LengthMismatch { .. }
            | DecodeError::Misaligned { .. }
            | DecodeError::ContainerTrailing { .. }
            | DecodeError::TrailingBytes { .. }
            | DecodeError::TrailingSource { .. }
            | DecodeError::Wire(WireError::EmptyBitlist) => ErrorKind::NonCanonical,
            DecodeError::ContainerLength { .. }
            | DecodeError::HeaderTooShort { .. }
            | DecodeError::NoOffsets
            | DecodeError::Wire(WireError::UnexpectedEof { .. }) => ErrorKind::MalformedHeader,
            DecodeError::TableMisaligned { .. }
            | DecodeError::OffsetsNotIncreasing { .. }
            | DecodeError::OffsetIntoHeader { .. }
            | DecodeError::RangeBehindCursor { .. } => ErrorKind::BadOffset,
            DecodeError::OffsetOverflow { .. } => ErrorKind::LengthOverflow,
            DecodeError::Wire(WireError::MissingSentinel | WireError::NonZeroPadding { .. }) => {
                ErrorKind::BitlistPadding
            }
            DecodeError::ReaderEof { .. } | DecodeError::Io(_) => ErrorKind::UnexpectedEof,
        }
    }

    /// Numeric code of [`kind`](Self::kind).
    #[must_use]
    pub fn code(&self) -> u8 {
        self.kind().code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_one_through_seven() {
        let kinds = [
            ErrorKind::BadOffset,
            ErrorKind::NonCanonical,
            ErrorKind::BitlistPadding,
            ErrorKind::UnsupportedType,
            ErrorKind::MalformedHeader,
            ErrorKind::LengthOverflow,
            ErrorKind::UnexpectedEof,
        ];
        let codes: Vec<u8> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn wire_errors_map_by_cause() {
        assert_eq!(
            DecodeError::from(WireError::EmptyBitlist).kind(),
            ErrorKind::NonCanonical
        );
        assert_eq!(
            DecodeError::from(WireError::MissingSentinel).kind(),
            ErrorKind::BitlistPadding
        );
        assert_eq!(
            DecodeError::from(WireError::UnexpectedEof {
                offset: 0,
                needed: 4,
                available: 1
            })
            .kind(),
            ErrorKind::MalformedHeader
        );
    }

    #[test]
    fn io_is_unexpected_eof() {
        let err = DecodeError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(err.code(), 7);
    }

    #[test]
    fn messages_carry_context() {
        let err = DecodeError::OffsetsNotIncreasing {
            index: 1,
            previous: 20,
            offset: 18,
        };
        assert_eq!(
            err.to_string(),
            "offset 18 at index 1 does not exceed previous offset 20"
        );
    }
}
