use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ssz_decoder::DecodeError;
use ssz_types::Schema;

use crate::InputArgs;

/// Load and validate the schema descriptor at `path`.
///
/// Read failures carry the path as context. Descriptor failures are
/// returned as a bare [`DecodeError`] so they report as
/// `UnsupportedType`.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let schema = Schema::from_json(&text).map_err(DecodeError::from)?;
    tracing::debug!(path = %path.display(), kind = %schema.kind(), "loaded schema");
    Ok(schema)
}

/// Load the schema and the full value bytes.
pub fn load(args: &InputArgs) -> Result<(Schema, Vec<u8>)> {
    let schema = load_schema(&args.schema)?;
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    Ok((schema, bytes))
}
