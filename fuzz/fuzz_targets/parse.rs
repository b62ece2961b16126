#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use ssz_decoder::CanonicalParser;
use ssz_types::Schema;

// Fuzz target: CanonicalParser::parse over arbitrary one-level schemas.
//
// Catches bugs in:
// - Offset table bounds (header size, overflow, monotonicity)
// - Container header accounting
// - Element width arithmetic
//
// Every range in an accepted layout must lie inside the buffer.

#[derive(Debug, Arbitrary)]
enum FuzzElement {
    Fixed(u8),
    Variable,
}

impl FuzzElement {
    fn schema(&self) -> Schema {
        match self {
            FuzzElement::Fixed(n) => Schema::basic(usize::from(*n)),
            FuzzElement::Variable => Schema::list(Schema::basic(1)),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum FuzzSchema {
    Basic(u16),
    Vector(FuzzElement),
    List(FuzzElement),
    Container(Vec<FuzzElement>),
    Bitlist,
}

impl FuzzSchema {
    fn schema(&self) -> Schema {
        match self {
            FuzzSchema::Basic(n) => Schema::basic(usize::from(*n)),
            FuzzSchema::Vector(e) => Schema::vector(e.schema()),
            FuzzSchema::List(e) => Schema::list(e.schema()),
            FuzzSchema::Container(fields) => {
                Schema::container(fields.iter().map(FuzzElement::schema).collect())
            }
            FuzzSchema::Bitlist => Schema::bitlist(),
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(shape) = FuzzSchema::arbitrary(&mut u) else {
        return;
    };
    let bytes = u.take_rest();
    let schema = shape.schema();

    if let Ok(layout) = CanonicalParser::parse(&schema, bytes) {
        for range in &layout.ranges {
            assert!(range.start <= range.end);
            assert!(range.end <= bytes.len());
        }
    }
});
