use ssz_wire::{Chunk, ZERO_CHUNK};

use crate::hasher::Hasher;

/// Roots of all-zero subtrees, computed on first use.
///
/// `zero(0)` is the zero chunk and `zero(h + 1) = H(zero(h), zero(h))`.
/// A subtree of height `h` padded entirely with zero chunks has root
/// `zero(h)`, so padding never needs to be materialized.
#[derive(Clone, Debug)]
pub struct ZeroHashes {
    levels: Vec<Chunk>,
}

impl Default for ZeroHashes {
    fn default() -> Self {
        Self {
            levels: vec![ZERO_CHUNK],
        }
    }
}

impl ZeroHashes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of a zero subtree of `height`, extending the cache as needed.
    pub fn get<H: Hasher + ?Sized>(&mut self, hasher: &H, height: usize) -> Chunk {
        while self.levels.len() <= height {
            let top = self.levels[self.levels.len() - 1];
            self.levels.push(hasher.hash_parent(&top, &top));
        }
        self.levels[height]
    }
}
