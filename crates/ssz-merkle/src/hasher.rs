use sha2::{Digest, Sha256};
use ssz_wire::Chunk;

/// The 32-byte and 64-byte hash primitives a root is built from.
///
/// Implementations must be pure: identical input bytes always produce
/// the identical digest, whatever the backend (portable, SIMD,
/// hardware). The hasher is passed to the merkleizer explicitly; there
/// is no process-wide backend selection.
pub trait Hasher: Send + Sync {
    /// Digest of a single 32-byte block.
    fn hash_leaf(&self, leaf: &Chunk) -> Chunk;

    /// Digest of the 64-byte concatenation `left ‖ right`.
    fn hash_parent(&self, left: &Chunk, right: &Chunk) -> Chunk;
}

impl<H: Hasher + ?Sized> Hasher for &H {
    fn hash_leaf(&self, leaf: &Chunk) -> Chunk {
        (**self).hash_leaf(leaf)
    }

    fn hash_parent(&self, left: &Chunk, right: &Chunk) -> Chunk {
        (**self).hash_parent(left, right)
    }
}

/// Portable SHA-256 backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash_leaf(&self, leaf: &Chunk) -> Chunk {
        Sha256::digest(leaf).into()
    }

    fn hash_parent(&self, left: &Chunk, right: &Chunk) -> Chunk {
        let mut hasher = Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }
}
