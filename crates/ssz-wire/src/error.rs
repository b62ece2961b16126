/// Low-level failures while reading offset slots and bitlist sentinels.
///
/// These are the building blocks the canonical parser in `ssz-decoder`
/// maps onto its closed error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete offset slot could be read.
    #[error("unexpected end of input at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A bitlist with zero bytes carries no sentinel at all.
    #[error("bitlist is empty")]
    EmptyBitlist,

    /// The last byte of a bitlist was 0x00, so no sentinel bit is present.
    #[error("bitlist sentinel missing: last byte is 0x00")]
    MissingSentinel,

    /// Padding bits of the last bitlist byte were not zero.
    #[error("bitlist padding bits non-zero: last byte {last_byte:#04X}, {padding_bits} padding bits")]
    NonZeroPadding { last_byte: u8, padding_bits: u32 },
}
