#![warn(clippy::pedantic)]

pub mod chunks;
pub mod error;
pub mod parser;
pub mod reader;

pub use chunks::SliceChunks;
pub use error::{DecodeError, ErrorKind};
pub use parser::{CanonicalParser, Layout};
pub use reader::{PullFn, ReaderChunks, DEFAULT_STAGING_CAPACITY, MIN_STAGING_CAPACITY};
