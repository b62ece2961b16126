use ssz_wire::chunk::length_chunk;
use ssz_wire::{Chunk, ZERO_CHUNK};

use crate::hasher::Hasher;
use crate::zero::ZeroHashes;

/// Incremental binary-carry Merkle tree builder.
///
/// Leaves are pushed one at a time. The stack holds at most one node per
/// height, with heights decreasing from bottom to top; pushing a leaf
/// merges equal-height pairs upward like incrementing a binary counter:
///
/// ```text
///   push a   [a₀]
///   push b   [a₀ b₀]        → [ab₁]
///   push c   [ab₁ c₀]
///   push d   [ab₁ c₀ d₀]    → [ab₁ cd₁] → [abcd₂]
///   push e   [abcd₂ e₀]
/// ```
///
/// [`finish`](Self::finish) closes the remaining stack by pairing each
/// lower node with the zero subtree of its own height before joining it
/// to the node below. The result equals the root of the leaf list padded
/// with zero chunks to the next power of two, using O(log n) memory.
///
/// A single leaf is its own root. No leaves gives the zero chunk.
pub struct Merkleizer<'h, H: ?Sized> {
    hasher: &'h H,
    stack: Vec<(Chunk, usize)>,
    zeros: ZeroHashes,
    leaves: u64,
}

impl<'h, H: Hasher + ?Sized> Merkleizer<'h, H> {
    pub fn new(hasher: &'h H) -> Self {
        Self {
            hasher,
            stack: Vec::new(),
            zeros: ZeroHashes::new(),
            leaves: 0,
        }
    }

    /// Number of leaves pushed so far.
    #[must_use]
    pub fn leaf_count(&self) -> u64 {
        self.leaves
    }

    pub fn push(&mut self, leaf: Chunk) {
        self.leaves += 1;
        let mut node = leaf;
        let mut height = 0;
        while let Some(&(below, below_height)) = self.stack.last() {
            if below_height != height {
                break;
            }
            self.stack.pop();
            node = self.hasher.hash_parent(&below, &node);
            height += 1;
        }
        self.stack.push((node, height));
    }

    /// Close the tree and return its root.
    #[must_use]
    pub fn finish(mut self) -> Chunk {
        let Some((mut node, mut height)) = self.stack.pop() else {
            return ZERO_CHUNK;
        };
        while let Some(&(below, below_height)) = self.stack.last() {
            if height < below_height {
                let zero = self.zeros.get(self.hasher, height);
                node = self.hasher.hash_parent(&node, &zero);
            } else {
                self.stack.pop();
                node = self.hasher.hash_parent(&below, &node);
            }
            height += 1;
        }
        tracing::trace!(leaves = self.leaves, height, "merkle tree closed");
        node
    }

    /// Close the tree and fold `length` into the root when given.
    #[must_use]
    pub fn finish_with_length(self, length: Option<u64>) -> Chunk {
        let hasher = self.hasher;
        let root = self.finish();
        match length {
            Some(length) => mix_in_length(hasher, &root, length),
            None => root,
        }
    }
}

/// `H(root ‖ length as 8-byte LE, zero-extended to 32 bytes)`.
pub fn mix_in_length<H: Hasher + ?Sized>(hasher: &H, root: &Chunk, length: u64) -> Chunk {
    hasher.hash_parent(root, &length_chunk(length))
}

/// Merkleize a fallible chunk stream.
///
/// The first error aborts the walk and is returned unchanged; no partial
/// root is produced.
///
/// # Errors
///
/// Returns whatever error the stream yields.
pub fn merkleize<H, I, E>(hasher: &H, chunks: I, length: Option<u64>) -> Result<Chunk, E>
where
    H: Hasher + ?Sized,
    I: IntoIterator<Item = Result<Chunk, E>>,
{
    let mut merkleizer = Merkleizer::new(hasher);
    for chunk in chunks {
        merkleizer.push(chunk?);
    }
    tracing::debug!(leaves = merkleizer.leaf_count(), mixin = ?length, "merkleized chunk stream");
    Ok(merkleizer.finish_with_length(length))
}
