use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ssz_decoder::CanonicalParser;
use ssz_driver::{ReaderMode, RootConfig, RootDriver, compute_root_from_slice};
use ssz_merkle::{Merkleizer, Sha256Hasher};
use ssz_tests::{trickle, u64_list};
use ssz_types::Schema;

fn bench_list_roots(c: &mut Criterion) {
    let schema = Schema::list(Schema::basic(8));
    let mut group = c.benchmark_group("list_u64_root");
    for len in [16u64, 1_000, 100_000] {
        let bytes = u64_list(0..len);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| compute_root_from_slice(&schema, bytes).unwrap());
        });
    }
    group.finish();
}

fn bench_parse_only(c: &mut Criterion) {
    let schema = Schema::list(Schema::basic(8));
    let bytes = u64_list(0..100_000);
    c.bench_function("parse_list_100k", |b| {
        b.iter(|| CanonicalParser::parse(&schema, &bytes).unwrap());
    });
}

fn bench_merkleizer(c: &mut Criterion) {
    c.bench_function("merkleize_65536_leaves", |b| {
        b.iter(|| {
            let mut m = Merkleizer::new(&Sha256Hasher);
            for i in 0..65_536u32 {
                let mut leaf = [0u8; 32];
                leaf[..4].copy_from_slice(&i.to_le_bytes());
                m.push(leaf);
            }
            m.finish()
        });
    });
}

fn bench_reader_modes(c: &mut Criterion) {
    let schema = Schema::basic(1 << 20);
    let bytes = vec![0xA5u8; 1 << 20];
    let buffered = RootDriver::new();
    let streaming = RootDriver::new().with_config(RootConfig {
        reader_mode: ReaderMode::Streaming,
        ..RootConfig::default()
    });

    let mut group = c.benchmark_group("reader_1mib");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("buffered", |b| {
        b.iter(|| buffered.root_from_reader(&schema, trickle(&bytes, 4096)).unwrap());
    });
    group.bench_function("streaming", |b| {
        b.iter(|| streaming.root_from_reader(&schema, trickle(&bytes, 4096)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_list_roots,
    bench_parse_only,
    bench_merkleizer,
    bench_reader_modes
);
criterion_main!(benches);
