/// Implementation of `ssz-verify root`.
///
/// Prints the lowercase hex root followed by a newline, and nothing
/// else, so the output can be captured directly:
///
/// ```text
/// $ ssz-verify root --file balances.bin --type balances.json
/// 8f5b0c4e...
/// ```
use std::fs::File;

use anyhow::{Context, Result};
use ssz_driver::{ReaderMode, RootConfig, RootDriver};

use crate::RootArgs;
use crate::input;

/// Run the `ssz-verify root` command.
///
/// # Errors
///
/// Returns an error if either file cannot be read, the schema is
/// invalid, or the value is not canonical.
pub fn run(args: &RootArgs) -> Result<()> {
    let root = if args.streaming {
        let schema = input::load_schema(&args.input.schema)?;
        let file = File::open(&args.input.file)
            .with_context(|| format!("cannot open {}", args.input.file.display()))?;
        let config = RootConfig {
            reader_mode: ReaderMode::Streaming,
            staging_capacity: args
                .staging_bytes
                .unwrap_or(RootConfig::default().staging_capacity),
            ..RootConfig::default()
        };
        RootDriver::new()
            .with_config(config)
            .root_from_reader(&schema, file)?
    } else {
        let (schema, bytes) = input::load(&args.input)?;
        ssz_driver::compute_root_from_slice(&schema, &bytes)?
    };

    println!("{root}");
    Ok(())
}
