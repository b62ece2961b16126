use ssz_decoder::{DEFAULT_STAGING_CAPACITY, MIN_STAGING_CAPACITY};

/// How [`RootDriver`](crate::RootDriver) consumes a reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReaderMode {
    /// Drain the reader into memory, then take the slice path.
    #[default]
    Buffered,

    /// Stream the reader through a bounded staging buffer when the
    /// schema's layout is known without reading the bytes. Schemas with
    /// offsets or sentinels fall back to `Buffered`.
    Streaming,
}

/// Configuration for root computation.
///
/// ```text
/// ┌──────────────────┬─────────┬──────────────────────────────────────────┐
/// │ Field            │ Default │ Purpose                                  │
/// ├──────────────────┼─────────┼──────────────────────────────────────────┤
/// │ reader_mode      │ Buffered│ Drain-then-parse, or bounded streaming   │
/// │ staging_capacity │ 4096    │ Pull-reader staging buffer (min 32)      │
/// │ drain_capacity   │ 8192    │ Read size when draining into memory      │
/// └──────────────────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// None of these settings change a root. They only trade memory for
/// read-call count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootConfig {
    pub reader_mode: ReaderMode,
    pub staging_capacity: usize,
    pub drain_capacity: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            reader_mode: ReaderMode::Buffered,
            staging_capacity: DEFAULT_STAGING_CAPACITY,
            drain_capacity: 8192,
        }
    }
}

impl RootConfig {
    /// Staging capacity raised to the one-chunk minimum.
    #[must_use]
    pub fn effective_staging_capacity(&self) -> usize {
        self.staging_capacity.max(MIN_STAGING_CAPACITY)
    }

    /// Drain capacity, never zero.
    #[must_use]
    pub fn effective_drain_capacity(&self) -> usize {
        self.drain_capacity.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RootConfig::default();
        assert_eq!(config.reader_mode, ReaderMode::Buffered);
        assert_eq!(config.staging_capacity, 4096);
        assert_eq!(config.drain_capacity, 8192);
    }

    #[test]
    fn capacities_are_clamped() {
        let config = RootConfig {
            staging_capacity: 3,
            drain_capacity: 0,
            ..RootConfig::default()
        };
        assert_eq!(config.effective_staging_capacity(), 32);
        assert_eq!(config.effective_drain_capacity(), 1);
    }
}
