#![warn(clippy::pedantic)]

pub mod async_reader;
pub mod config;
pub mod driver;
pub mod root;

pub use async_reader::compute_root_from_async_reader;
pub use config::{ReaderMode, RootConfig};
pub use driver::{compute_root_from_reader, compute_root_from_slice, RootDriver};
pub use root::Root;

pub use ssz_decoder::{DecodeError, ErrorKind};
pub use ssz_merkle::{Hasher, Sha256Hasher};
pub use ssz_types::Schema;
