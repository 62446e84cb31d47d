//! Criterion benchmarks for the block pipeline and the stream drivers.
//!
//! Run with:
//!   cargo bench --bench shrink

use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lz4opt::{compress_stream, decompress_stream, StreamOptions};

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_stream");

    for &size in &[65_536usize, 1 << 20] {
        let data = lz4opt::lorem::gen_buffer(size, size as u32);
        group.throughput(Throughput::Bytes(size as u64));

        for (label, favor_ratio) in [("ratio", true), ("speed", false)] {
            let opts = StreamOptions {
                favor_ratio,
                ..StreamOptions::default()
            };
            group.bench_with_input(BenchmarkId::new(label, size), &data, |b, data| {
                let mut out = Vec::with_capacity(size);
                b.iter(|| {
                    out.clear();
                    compress_stream(&mut Cursor::new(data), &mut out, &[], &opts).unwrap();
                    out.len()
                });
            });
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_stream");

    for &size in &[65_536usize, 1 << 20] {
        let data = lz4opt::lorem::gen_buffer(size, size as u32);
        let mut compressed = Vec::new();
        compress_stream(
            &mut Cursor::new(&data),
            &mut compressed,
            &[],
            &StreamOptions::default(),
        )
        .unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("verify_decoder", size), &compressed, |b, input| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size);
                decompress_stream(&mut Cursor::new(input), &mut out, &[], false).unwrap();
                out.len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
