use ssz_types::Schema;
use ssz_wire::bitlist::decode_bitlist_len;
use ssz_wire::offset::{read_offset, OFFSET_SIZE};
use ssz_wire::ByteRange;

use crate::error::DecodeError;

/// Result of a successful parse: where each element or field lives in
/// the buffer, and the length to fold into the root, if any.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │ Layout                                                  │
/// │   ranges:       Vec<ByteRange>  ← schema order, no gaps │
/// │                                   between fixed fields  │
/// │   length_mixin: Option<u64>     ← List: element count   │
/// │                                   Bitlist: bit length   │
/// │                                   others: None          │
/// └─────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub ranges: Vec<ByteRange>,
    pub length_mixin: Option<u64>,
}

impl Layout {
    fn new(ranges: Vec<ByteRange>) -> Self {
        Self {
            ranges,
            length_mixin: None,
        }
    }

    fn whole(len: usize) -> Self {
        Self::new(vec![ByteRange::new(0, len)])
    }

    /// Total number of 32-byte chunks the ranges will produce.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.ranges.iter().map(|r| r.chunk_count()).sum()
    }
}

/// Strict schema-directed parser.
///
/// Maps a schema and a fully available buffer to the byte ranges of its
/// elements or fields. Any buffer that is not the single canonical
/// encoding of its value is rejected; nothing is normalized. The parser
/// never indexes out of bounds: every read goes through a checked
/// accessor and every rejection is a typed [`DecodeError`].
///
/// Per-kind rules:
///
/// ```text
///   Basic(None)          → MissingFixedSize
///   Basic(0)             → [0, len)
///   Basic(n)             → len == n, [0, n)
///   Bitlist              → sentinel scan, [0, len), mixin = bit length
///   Vector/List(fixed e) → len % e == 0, one range per element
///   Vector/List(var)     → offset table
///   Container()          → [0, len)
///   Container(all fixed) → len == Σ sizes, one range per field
///   Container(mixed)     → fixed part + offsets
/// ```
///
/// Nested element and field schemas are treated as opaque spans; only
/// their declared fixed size takes part in the layout.
pub struct CanonicalParser;

impl CanonicalParser {
    /// Parse `bytes` as a value of `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first canonicality violation found. See
    /// [`DecodeError::kind`] for how each variant is classified.
    pub fn parse(schema: &Schema, bytes: &[u8]) -> Result<Layout, DecodeError> {
        let layout = match schema {
            Schema::Basic { fixed_size: None } => return Err(DecodeError::MissingFixedSize),
            Schema::Basic { fixed_size: Some(0) } => Layout::whole(bytes.len()),
            Schema::Basic {
                fixed_size: Some(n),
            } => {
                Self::check_static_len(schema, bytes.len())?;
                Layout::whole(*n)
            }
            Schema::Bitlist { .. } => {
                let bits = decode_bitlist_len(bytes)?;
                Layout {
                    length_mixin: Some(bits),
                    ..Layout::whole(bytes.len())
                }
            }
            Schema::Vector { element } => Layout::new(parse_sequence(element, bytes, false)?),
            Schema::List { element, .. } => {
                let ranges = parse_sequence(element, bytes, true)?;
                Layout {
                    length_mixin: Some(ranges.len() as u64),
                    ranges,
                }
            }
            Schema::Container { fields } if fields.is_empty() => Layout::whole(bytes.len()),
            Schema::Container { fields } if fields.iter().all(Schema::is_fixed_size) => {
                Self::check_static_len(schema, bytes.len())?;
                Layout::new(parse_fixed_container(fields, bytes.len())?)
            }
            Schema::Container { fields } => Layout::new(parse_variable_container(fields, bytes)?),
        };

        tracing::debug!(
            kind = %schema.kind(),
            len = bytes.len(),
            ranges = layout.ranges.len(),
            mixin = ?layout.length_mixin,
            "parsed canonical layout"
        );
        Ok(layout)
    }

    /// Layout of a schema whose ranges do not depend on the bytes.
    ///
    /// Returns `Some` for a fixed-size `Basic` and for a non-empty
    /// container of fixed-size fields, together with the exact number of
    /// bytes a canonical encoding must have. A reader can then be
    /// streamed against the returned ranges without buffering it.
    #[must_use]
    pub fn static_layout(schema: &Schema) -> Option<(Layout, usize)> {
        let total = schema.static_size()?;
        let layout = match schema {
            Schema::Container { fields } => Layout::new(fixed_field_ranges(fields)),
            _ => Layout::whole(total),
        };
        Some((layout, total))
    }

    /// Reject a statically laid-out value whose total length is wrong.
    ///
    /// The verdict depends only on `len`, so a streamed source can be
    /// classified exactly like a buffered one once its length is known.
    /// Schemas without a static layout always pass.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::LengthMismatch`] for a fixed-size `Basic`.
    /// - [`DecodeError::ContainerLength`] for an all-fixed container.
    pub fn check_static_len(schema: &Schema, len: usize) -> Result<(), DecodeError> {
        let expected = match schema {
            Schema::Basic { .. } => schema.fixed_size(),
            Schema::Container { fields }
                if !fields.is_empty() && fields.iter().all(Schema::is_fixed_size) =>
            {
                Some(
                    fields
                        .iter()
                        .filter_map(Schema::fixed_size)
                        .fold(0usize, usize::saturating_add),
                )
            }
            _ => None,
        };
        let Some(expected) = expected else {
            return Ok(());
        };
        if len == expected {
            return Ok(());
        }
        Err(match schema {
            Schema::Container { .. } => DecodeError::ContainerLength {
                expected,
                actual: len,
            },
            _ => DecodeError::LengthMismatch {
                expected,
                actual: len,
            },
        })
    }
}

// ── Sequences ────────────────────────────────────────────────────────────

fn parse_sequence(
    element: &Schema,
    bytes: &[u8],
    is_list: bool,
) -> Result<Vec<ByteRange>, DecodeError> {
    if let Some(size) = element.fixed_size() {
        if bytes.len() % size != 0 {
            return Err(DecodeError::Misaligned {
                len: bytes.len(),
                element_size: size,
            });
        }
        return Ok((0..bytes.len() / size)
            .map(|i| ByteRange::with_len(i * size, size))
            .collect());
    }

    // An empty list has no offset table at all.
    if is_list && bytes.is_empty() {
        return Ok(Vec::new());
    }
    parse_offset_table(bytes)
}

/// Offset-table layout for sequences of variable-size elements.
///
/// Slots are collected from byte 0 until a slot points before the slot
/// following it. The table must be exactly as long as its first offset
/// claims, strictly increasing, and end precisely at the buffer end.
fn parse_offset_table(bytes: &[u8]) -> Result<Vec<ByteRange>, DecodeError> {
    let len = bytes.len();
    if len < OFFSET_SIZE {
        return Err(DecodeError::HeaderTooShort {
            len,
            header: OFFSET_SIZE,
        });
    }

    let mut offsets = Vec::new();
    let mut pos = 0;
    while pos + OFFSET_SIZE <= len {
        let offset = read_offset(bytes, pos)?;
        if offset < pos + OFFSET_SIZE {
            break;
        }
        offsets.push(offset);
        pos += OFFSET_SIZE;
    }

    let Some(&first) = offsets.first() else {
        return Err(DecodeError::NoOffsets);
    };
    if first != offsets.len() * OFFSET_SIZE {
        return Err(DecodeError::TableMisaligned {
            first,
            entries: offsets.len(),
        });
    }
    check_increasing(&offsets)?;

    let last = offsets[offsets.len() - 1];
    if last > len {
        return Err(DecodeError::OffsetOverflow { offset: last, len });
    }
    if last != len {
        return Err(DecodeError::TrailingBytes {
            end: last,
            extra: len - last,
        });
    }

    Ok(ranges_between(&offsets, len))
}

// ── Containers ───────────────────────────────────────────────────────────

fn fixed_field_ranges(fields: &[Schema]) -> Vec<ByteRange> {
    let mut cursor = 0;
    fields
        .iter()
        .filter_map(Schema::fixed_size)
        .map(|size| {
            let range = ByteRange::with_len(cursor, size);
            cursor += size;
            range
        })
        .collect()
}

/// Field ranges of an all-fixed container whose width already matched.
fn parse_fixed_container(fields: &[Schema], len: usize) -> Result<Vec<ByteRange>, DecodeError> {
    let ranges = fixed_field_ranges(fields);
    let cursor = ranges.last().map_or(0, |r| r.end);
    if cursor != len {
        return Err(DecodeError::ContainerTrailing { cursor, len });
    }
    Ok(ranges)
}

/// Container with at least one variable-size field.
///
/// ```text
///   ┌───────────┬──────────┬───────────┬──────────┬─────────────────┐
///   │ fixed f0  │ off(f1)  │ fixed f2  │ off(f3)  │ f1 data │ f3 .. │
///   └───────────┴──────────┴───────────┴──────────┴─────────────────┘
///   ├──────────────── header width ───────────────┤
/// ```
fn parse_variable_container(
    fields: &[Schema],
    bytes: &[u8],
) -> Result<Vec<ByteRange>, DecodeError> {
    let len = bytes.len();
    let header = fields
        .iter()
        .map(|f| f.fixed_size().unwrap_or(OFFSET_SIZE))
        .fold(0usize, usize::saturating_add);
    if len < header {
        return Err(DecodeError::HeaderTooShort { len, header });
    }

    let mut offsets = Vec::new();
    let mut cursor = 0;
    for field in fields {
        match field.fixed_size() {
            Some(size) => cursor += size,
            None => {
                offsets.push(read_offset(bytes, cursor)?);
                cursor += OFFSET_SIZE;
            }
        }
    }

    for (field, &offset) in offsets.iter().enumerate() {
        if offset < header {
            return Err(DecodeError::OffsetIntoHeader {
                field,
                offset,
                header,
            });
        }
        if offset > len {
            return Err(DecodeError::OffsetOverflow { offset, len });
        }
    }
    check_increasing(&offsets)?;

    let variable = ranges_between(&offsets, len);
    let mut variable = variable.into_iter();
    let mut cursor = 0;
    let mut ranges = Vec::with_capacity(fields.len());
    for field in fields {
        if let Some(size) = field.fixed_size() {
            ranges.push(ByteRange::with_len(cursor, size));
            cursor += size;
        } else {
            cursor += OFFSET_SIZE;
            ranges.extend(variable.next());
        }
    }
    Ok(ranges)
}

// ── Shared ───────────────────────────────────────────────────────────────

fn check_increasing(offsets: &[usize]) -> Result<(), DecodeError> {
    for (i, pair) in offsets.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(DecodeError::OffsetsNotIncreasing {
                index: i + 1,
                previous: pair[0],
                offset: pair[1],
            });
        }
    }
    Ok(())
}

/// `[offsets[i], offsets[i + 1])`, the last range closing at `len`.
fn ranges_between(offsets: &[usize], len: usize) -> Vec<ByteRange> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, &start)| ByteRange::new(start, offsets.get(i + 1).copied().unwrap_or(len)))
        .collect()
}
