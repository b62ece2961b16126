use crate::error::WireError;

/// Decode the bit length of a sentinel-terminated bitlist.
///
/// The highest set bit of the last byte is the sentinel; it marks the
/// end of the data bits and is not itself data. The bit length is
/// therefore `(len - 1) * 8 + sentinel_position`.
///
/// The low `7 - sentinel_position` bits of the last byte are padding
/// and must be zero. A sentinel at bit 3 or below falls inside its own
/// padding mask, so such bytes are always rejected:
///
/// ```text
///   0x10 = 0b0001_0000   sentinel at bit 4, low 3 bits zero  → 4 bits
///   0x3F = 0b0011_1111   sentinel at bit 5, low 2 bits set   → rejected
///   0x00                 no sentinel                         → rejected
/// ```
///
/// # Errors
///
/// - [`WireError::EmptyBitlist`] if `bytes` is empty.
/// - [`WireError::MissingSentinel`] if the last byte is zero.
/// - [`WireError::NonZeroPadding`] if any padding bit is set.
pub fn decode_bitlist_len(bytes: &[u8]) -> Result<u64, WireError> {
    let Some(&last_byte) = bytes.last() else {
        return Err(WireError::EmptyBitlist);
    };
    if last_byte == 0 {
        return Err(WireError::MissingSentinel);
    }

    let sentinel_position = 7 - last_byte.leading_zeros();
    let padding_bits = 7 - sentinel_position;

    // A shift width of 32 or more has no mask; treat it as a padding violation.
    let mask = 1u32
        .checked_shl(padding_bits)
        .filter(|_| padding_bits < 31)
        .map(|bit| bit - 1)
        .ok_or(WireError::NonZeroPadding {
            last_byte,
            padding_bits,
        })?;
    if u32::from(last_byte) & mask != 0 {
        return Err(WireError::NonZeroPadding {
            last_byte,
            padding_bits,
        });
    }

    let full_bytes = (bytes.len() - 1) as u64;
    Ok(full_bytes * 8 + u64::from(sentinel_position))
}
