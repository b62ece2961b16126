use std::io::{self, Read};

use ssz_wire::{ByteRange, Chunk, BYTES_PER_CHUNK, ZERO_CHUNK};

use crate::error::DecodeError;

/// Default size of the staging buffer between the source and the
/// chunk assembler.
pub const DEFAULT_STAGING_CAPACITY: usize = 4096;

/// Smallest staging buffer accepted. Smaller requests are raised to
/// one chunk.
pub const MIN_STAGING_CAPACITY: usize = BYTES_PER_CHUNK;

/// Adapts a fill callback into a [`Read`] source.
///
/// The callback receives a buffer to fill and returns how many bytes it
/// wrote; `0` means the source is exhausted. A count larger than the
/// buffer is clamped to the buffer length.
///
/// ```rust
/// use std::io::Read;
/// use ssz_decoder::PullFn;
///
/// let data = [1u8, 2, 3];
/// let mut pos = 0;
/// let mut reader = PullFn::new(|buf: &mut [u8]| {
///   let n = buf.len().min(data.len() - pos);
///   buf[..n].copy_from_slice(&data[pos..pos + n]);
///   pos += n;
///   n
/// });
/// let mut out = Vec::new();
/// reader.read_to_end(&mut out).unwrap();
/// assert_eq!(out, data);
/// ```
pub struct PullFn<F> {
  fill: F,
}

impl<F: FnMut(&mut [u8]) -> usize> PullFn<F> {
  pub fn new(fill: F) -> Self {
    Self { fill }
  }
}

impl<F: FnMut(&mut [u8]) -> usize> Read for PullFn<F> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    Ok((self.fill)(buf).min(buf.len()))
  }
}

/// Pull-reader chunk streamer.
///
/// Yields the same chunk sequence as [`SliceChunks`](crate::SliceChunks)
/// but reads its bytes on demand from a [`Read`] source through a
/// bounded staging buffer. The buffer is refilled transparently, both
/// inside a chunk and between chunks, so memory use is independent of
/// the input size.
///
/// Ranges must ascend: the source is forward-only. Bytes between two
/// ranges are read and discarded.
///
/// Errors:
///
/// - the source ends before a range is complete → [`DecodeError::ReaderEof`]
/// - a range starts behind the read position → [`DecodeError::RangeBehindCursor`]
/// - the source fails → [`DecodeError::Io`]
///
/// After the first error the iterator is fused and yields `None`.
pub struct ReaderChunks<R> {
  reader: R,
  ranges: std::vec::IntoIter<ByteRange>,
  /// Remaining part of the range currently being chunked.
  current: Option<ByteRange>,
  staging: Box<[u8]>,
  /// Valid bytes in `staging` are `staging[head..filled]`.
  head: usize,
  filled: usize,
  /// Absolute source position of `staging[head]`.
  position: usize,
  finished: bool,
}

impl<R: Read> ReaderChunks<R> {
  #[must_use]
  pub fn new(reader: R, ranges: Vec<ByteRange>) -> Self {
    Self::with_capacity(reader, ranges, DEFAULT_STAGING_CAPACITY)
  }

  /// Build a streamer whose staging buffer holds `capacity` bytes
  /// (at least [`MIN_STAGING_CAPACITY`]).
  #[must_use]
  pub fn with_capacity(reader: R, ranges: Vec<ByteRange>, capacity: usize) -> Self {
    Self {
      reader,
      ranges: ranges.into_iter(),
      current: None,
      staging: vec![0u8; capacity.max(MIN_STAGING_CAPACITY)].into_boxed_slice(),
      head: 0,
      filled: 0,
      position: 0,
      finished: false,
    }
  }

  /// Number of source bytes consumed so far.
  #[must_use]
  pub fn position(&self) -> usize {
    self.position
  }

  /// Require that the source holds no bytes past the current position.
  ///
  /// # Errors
  ///
  /// Returns [`DecodeError::TrailingSource`] if another byte can be
  /// read, or [`DecodeError::Io`] if the source fails.
  pub fn ensure_exhausted(&mut self) -> Result<(), DecodeError> {
    if self.head < self.filled || self.refill()? > 0 {
      return Err(DecodeError::TrailingSource { len: self.position });
    }
    Ok(())
  }

  /// Total length of the source: bytes consumed so far, bytes staged,
  /// and whatever the source still holds. The remainder is read through
  /// the staging buffer and discarded.
  ///
  /// # Errors
  ///
  /// Returns [`DecodeError::Io`] if the source fails.
  pub fn source_len(mut self) -> Result<usize, DecodeError> {
    let mut len = self.position + (self.filled - self.head);
    self.head = self.filled;
    loop {
      match self.refill()? {
        0 => return Ok(len),
        n => len += n,
      }
    }
  }

  fn refill(&mut self) -> Result<usize, DecodeError> {
    loop {
      match self.reader.read(&mut self.staging) {
        Ok(n) => {
          self.head = 0;
          self.filled = n;
          tracing::trace!(read = n, position = self.position, "refilled staging buffer");
          return Ok(n);
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
        Err(e) => return Err(e.into()),
      }
    }
  }

  /// Advance over source bytes until `target`, refilling as needed.
  fn skip_to(&mut self, target: usize, needed: usize) -> Result<(), DecodeError> {
    while self.position < target {
      if self.head == self.filled && self.refill()? == 0 {
        return Err(DecodeError::ReaderEof {
          position: self.position,
          needed,
        });
      }
      let step = (self.filled - self.head).min(target - self.position);
      self.head += step;
      self.position += step;
    }
    Ok(())
  }

  /// Fill `out` completely from the source.
  fn take(&mut self, out: &mut [u8], needed: usize) -> Result<(), DecodeError> {
    let mut copied = 0;
    while copied < out.len() {
      if self.head == self.filled && self.refill()? == 0 {
        return Err(DecodeError::ReaderEof {
          position: self.position,
          needed,
        });
      }
      let step = (self.filled - self.head).min(out.len() - copied);
      out[copied..copied + step].copy_from_slice(&self.staging[self.head..self.head + step]);
      self.head += step;
      self.position += step;
      copied += step;
    }
    Ok(())
  }

  fn next_chunk(&mut self) -> Result<Option<Chunk>, DecodeError> {
    let range = loop {
      match self.current.take() {
        Some(range) if !range.is_empty() => break range,
        _ => {
          let Some(next) = self.ranges.next() else {
            return Ok(None);
          };
          if next.start < self.position {
            return Err(DecodeError::RangeBehindCursor {
              start: next.start,
              position: self.position,
            });
          }
          self.current = Some(next);
        }
      }
    };

    self.skip_to(range.start, range.end)?;
    let take = range.len().min(BYTES_PER_CHUNK);
    let mut chunk = ZERO_CHUNK;
    self.take(&mut chunk[..take], range.end)?;
    self.current = Some(ByteRange::new(range.start + take, range.end));
    Ok(Some(chunk))
  }
}

impl<R: Read> Iterator for ReaderChunks<R> {
  type Item = Result<Chunk, DecodeError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }
    match self.next_chunk() {
      Ok(Some(chunk)) => Some(Ok(chunk)),
      Ok(None) => {
        self.finished = true;
        None
      }
      Err(e) => {
        self.finished = true;
        Some(Err(e))
      }
    }
  }
}
