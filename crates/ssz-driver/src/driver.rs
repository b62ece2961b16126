use std::io::{self, Read};

use ssz_decoder::{CanonicalParser, DecodeError, PullFn, ReaderChunks, SliceChunks};
use ssz_merkle::{merkleize, Hasher, Sha256Hasher};
use ssz_types::Schema;

use crate::config::{ReaderMode, RootConfig};
use crate::root::Root;

/// Parse, chunk, and merkleize a value in one call.
///
/// The driver holds no state between calls; the same instance can be
/// shared across threads. The hash primitive is owned by the driver and
/// fixed at construction.
///
/// ```text
///   bytes ──▶ CanonicalParser ──▶ Layout ──▶ SliceChunks ──▶ merkleize ──▶ Root
///                                   │                           ▲
///                                   └──── length_mixin ─────────┘
/// ```
///
/// Any error from the parser or the chunk streamer is returned as is;
/// no partial root is ever produced.
///
/// # Example
///
/// ```rust
/// use ssz_driver::{RootDriver, Schema};
///
/// let root = RootDriver::new()
///     .root_from_slice(&Schema::basic(32), &[0xFF; 32])
///     .unwrap();
/// assert_eq!(root.as_bytes(), &[0xFF; 32]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RootDriver<H = Sha256Hasher> {
    hasher: H,
    config: RootConfig,
}

impl RootDriver<Sha256Hasher> {
    /// Driver with the SHA-256 backend and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: Hasher> RootDriver<H> {
    /// Driver with a caller-supplied hash backend.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            config: RootConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RootConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    /// Root of a fully available buffer.
    ///
    /// # Errors
    ///
    /// Returns the parser's [`DecodeError`] if `bytes` is not the
    /// canonical encoding of a `schema` value.
    pub fn root_from_slice(&self, schema: &Schema, bytes: &[u8]) -> Result<Root, DecodeError> {
        let layout = CanonicalParser::parse(schema, bytes)?;
        let chunks = SliceChunks::new(bytes, &layout.ranges).map(Ok::<_, DecodeError>);
        let root = merkleize(&self.hasher, chunks, layout.length_mixin)?;
        Ok(Root(root))
    }

    /// Root of the bytes produced by `reader`.
    ///
    /// In [`ReaderMode::Buffered`] the reader is drained into memory and
    /// the slice path is taken. In [`ReaderMode::Streaming`] a schema
    /// with a static layout is streamed chunk by chunk with memory
    /// bounded by the staging capacity; the source must then be
    /// exhausted. Other schemas fall back to buffering.
    ///
    /// # Errors
    ///
    /// - Any parser error, as for [`root_from_slice`](Self::root_from_slice).
    ///   A streamed source of the wrong length reports the same error the
    ///   parser gives for a buffer of that length.
    /// - [`DecodeError::Io`] if the reader fails.
    pub fn root_from_reader<R: Read>(&self, schema: &Schema, reader: R) -> Result<Root, DecodeError> {
        if self.config.reader_mode == ReaderMode::Streaming {
            if let Some((layout, total)) = CanonicalParser::static_layout(schema) {
                tracing::debug!(total, ranges = layout.ranges.len(), "streaming reader");
                let mut chunks = ReaderChunks::with_capacity(
                    reader,
                    layout.ranges,
                    self.config.effective_staging_capacity(),
                );
                let streamed = merkleize(&self.hasher, &mut chunks, layout.length_mixin)
                    .and_then(|root| chunks.ensure_exhausted().map(|()| root));
                return match streamed {
                    Ok(root) => Ok(Root(root)),
                    // Classify a wrong-length source the way the parser
                    // classifies a wrong-length buffer.
                    Err(e @ (DecodeError::ReaderEof { .. } | DecodeError::TrailingSource { .. })) => {
                        let len = chunks.source_len()?;
                        tracing::debug!(len, expected = total, "streamed source has wrong length");
                        Err(CanonicalParser::check_static_len(schema, len).err().unwrap_or(e))
                    }
                    Err(e) => Err(e),
                };
            }
            tracing::debug!(kind = %schema.kind(), "layout depends on input, buffering reader");
        }

        let bytes = drain(reader, self.config.effective_drain_capacity())?;
        tracing::debug!(len = bytes.len(), "drained reader");
        self.root_from_slice(schema, &bytes)
    }

    /// Root of the bytes produced by a fill callback.
    ///
    /// `fill` writes into the buffer it is given and returns the byte
    /// count; `0` ends the source.
    ///
    /// # Errors
    ///
    /// As for [`root_from_reader`](Self::root_from_reader).
    pub fn root_from_pull<F>(&self, schema: &Schema, fill: F) -> Result<Root, DecodeError>
    where
        F: FnMut(&mut [u8]) -> usize,
    {
        self.root_from_reader(schema, PullFn::new(fill))
    }
}

fn drain<R: Read>(mut reader: R, granularity: usize) -> Result<Vec<u8>, DecodeError> {
    let mut bytes = Vec::new();
    let mut scratch = vec![0u8; granularity];
    loop {
        match reader.read(&mut scratch) {
            Ok(0) => return Ok(bytes),
            Ok(n) => bytes.extend_from_slice(&scratch[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// Root of a fully available buffer, using SHA-256.
///
/// # Errors
///
/// See [`RootDriver::root_from_slice`].
pub fn compute_root_from_slice(schema: &Schema, bytes: &[u8]) -> Result<Root, DecodeError> {
    RootDriver::new().root_from_slice(schema, bytes)
}

/// Root of the bytes produced by a fill callback, using SHA-256 and
/// the buffered reader mode.
///
/// # Errors
///
/// See [`RootDriver::root_from_reader`].
pub fn compute_root_from_reader<F>(schema: &Schema, pull_fn: F) -> Result<Root, DecodeError>
where
    F: FnMut(&mut [u8]) -> usize,
{
    RootDriver::new().root_from_pull(schema, pull_fn)
}
