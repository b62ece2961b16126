#![warn(clippy::pedantic)]

pub mod bitlist;
pub mod chunk;
pub mod error;
pub mod offset;
pub mod range;

pub use chunk::{BYTES_PER_CHUNK, Chunk, ZERO_CHUNK};
pub use error::WireError;
pub use range::ByteRange;
