#![warn(clippy::pedantic)]

pub mod descriptor;
pub mod error;
pub mod schema;

pub use descriptor::{KindTag, SchemaDescriptor};
pub use error::SchemaError;
pub use schema::{Kind, Schema};
