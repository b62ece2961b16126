/// Implementation of `ssz-verify inspect`.
///
/// # Output format
///
/// ```text
/// Schema: container of 3 fields [basic[8], bytes, bytes]
/// Bytes:  20
/// Range 0: [0, 8) 8 bytes
/// Range 1: [16, 18) 2 bytes
/// Range 2: [18, 20) 2 bytes
/// ---
/// Chunks: 3
/// Mixin:  none
/// Root:   1f0c...
/// ```
///
/// With `--chunks`, each chunk follows as `Chunk N: <hex>`.
use anyhow::Result;
use ssz_decoder::{CanonicalParser, SliceChunks};
use ssz_driver::compute_root_from_slice;
use ssz_types::Schema;

use crate::InspectArgs;
use crate::input;

/// Run the `ssz-verify inspect` command.
///
/// # Errors
///
/// Returns an error if either file cannot be read, the schema is
/// invalid, or the value is not canonical.
pub fn run(args: &InspectArgs) -> Result<()> {
    let (schema, bytes) = input::load(&args.input)?;
    let layout = CanonicalParser::parse(&schema, &bytes)?;

    println!("Schema: {}", describe(&schema));
    println!("Bytes:  {}", bytes.len());
    for (idx, range) in layout.ranges.iter().enumerate() {
        println!("Range {idx}: {range} {} bytes", range.len());
    }
    println!("---");
    println!("Chunks: {}", layout.chunk_count());
    match layout.length_mixin {
        Some(m) => println!("Mixin:  {m}"),
        None => println!("Mixin:  none"),
    }

    if args.chunks {
        for (idx, chunk) in SliceChunks::new(&bytes, &layout.ranges).enumerate() {
            println!("Chunk {idx}: {}", hex::encode(chunk));
        }
    }

    println!("Root:   {}", compute_root_from_slice(&schema, &bytes)?);
    Ok(())
}

/// One-line description of a schema, nested schemas in brackets.
pub fn describe(schema: &Schema) -> String {
    match schema {
        Schema::Basic { fixed_size: None } => "basic[?]".to_string(),
        Schema::Basic {
            fixed_size: Some(0),
        } => "bytes".to_string(),
        Schema::Basic {
            fixed_size: Some(n),
        } => format!("basic[{n}]"),
        Schema::Vector { element } => format!("vector of {}", describe(element)),
        Schema::List {
            element,
            max_length,
        } => match max_length {
            Some(max) => format!("list of {} (max {max})", describe(element)),
            None => format!("list of {}", describe(element)),
        },
        Schema::Container { fields } if fields.is_empty() => "container of 0 fields".to_string(),
        Schema::Container { fields } => {
            let inner: Vec<_> = fields.iter().map(describe).collect();
            format!("container of {} fields [{}]", fields.len(), inner.join(", "))
        }
        Schema::Bitlist {
            max_length: Some(max),
        } => format!("bitlist (max {max})"),
        Schema::Bitlist { max_length: None } => "bitlist".to_string(),
    }
}
