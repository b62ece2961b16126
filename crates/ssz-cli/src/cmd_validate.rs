/// Implementation of `ssz-verify validate`.
///
/// Runs the pipeline one stage at a time and reports each stage:
///
/// ```text
/// ✓ Schema: list of basic[8] (max 1024)
/// ✓ Layout: 3 ranges, 3 chunks, mixin 3
/// ✓ Root: 5c1b...
/// ```
///
/// The first failing stage prints a `✗` line and the command exits 1.
use anyhow::{Result, bail};
use ssz_decoder::CanonicalParser;
use ssz_driver::RootDriver;

use crate::ValidateArgs;
use crate::cmd_inspect::describe;
use crate::input;

/// Run the `ssz-verify validate` command.
///
/// # Errors
///
/// Returns the [`DecodeError`](ssz_decoder::DecodeError) of the first
/// failing stage, or an error if the root differs from `--expect`.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let (schema, bytes) = input::load(&args.input)?;
    println!("✓ Schema: {}", describe(&schema));

    let layout = match CanonicalParser::parse(&schema, &bytes) {
        Ok(layout) => layout,
        Err(e) => {
            println!("✗ Layout: {} ({})", e, e.kind());
            return Err(e.into());
        }
    };
    let mixin = layout
        .length_mixin
        .map_or_else(|| "no mixin".to_string(), |m| format!("mixin {m}"));
    println!(
        "✓ Layout: {} range{}, {} chunk{}, {mixin}",
        layout.ranges.len(),
        plural(layout.ranges.len()),
        layout.chunk_count(),
        plural(layout.chunk_count()),
    );

    let root = RootDriver::new().root_from_slice(&schema, &bytes)?;
    println!("✓ Root: {root}");

    if let Some(expected) = args.expect {
        if expected != root {
            println!("✗ Expected: {expected}");
            bail!("root mismatch: expected {expected}, got {root}");
        }
        println!("✓ Expected: matches");
    }
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
