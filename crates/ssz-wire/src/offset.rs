use crate::error::WireError;

/// Width of one offset slot on the wire.
///
/// Offsets are unsigned 32-bit little-endian integers. They appear in
/// the header of a variable-size list (one per element) and in the
/// fixed part of a container (one per variable-size field).
pub const OFFSET_SIZE: usize = 4;

/// Read the little-endian offset slot starting at byte `at`.
///
/// # Errors
///
/// Returns [`WireError::UnexpectedEof`] if fewer than [`OFFSET_SIZE`]
/// bytes remain at `at`.
pub fn read_offset(buf: &[u8], at: usize) -> Result<usize, WireError> {
    let slot = at
        .checked_add(OFFSET_SIZE)
        .and_then(|end| buf.get(at..end))
        .ok_or(WireError::UnexpectedEof {
            offset: at,
            needed: OFFSET_SIZE,
            available: buf.len().saturating_sub(at),
        })?;

    let raw = u32::from_le_bytes([slot[0], slot[1], slot[2], slot[3]]);
    Ok(raw as usize)
}

/// Append `value` as a 4-byte little-endian offset slot.
pub fn write_offset(value: u32, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_le_bytes());
}
