#![warn(clippy::pedantic)]

pub mod hasher;
pub mod merkleizer;
pub mod zero;

pub use hasher::{Hasher, Sha256Hasher};
pub use merkleizer::{merkleize, mix_in_length, Merkleizer};
pub use zero::ZeroHashes;
