//! Benchmarks for the webb layout pipeline
//!
//! Measures performance of:
//! - Building the panel from its path strings
//! - Adjacency resolution (quadratic in LED count)
//! - Fixed-point projection
//! - Header serialization

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use webb_layout::{adjacency, projection, webb, LayoutBuilder, LayoutConfig, LayoutTable};

/// Benchmark building the panel from path strings
fn bench_build(c: &mut Criterion) {
    c.bench_function("webb_build", |b| {
        b.iter(|| webb::build(black_box(LayoutConfig::default())))
    });
}

/// Benchmark adjacency resolution at different LED densities
fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");

    for &leds in &[5usize, 13, 26, 52] {
        let config = LayoutConfig {
            leds_per_segment: leds,
            ..LayoutConfig::default()
        };
        let mut builder = LayoutBuilder::new(config).unwrap();
        for spec in webb::INNER_SEQUENCES {
            builder.sequence(spec.start, spec.path, leds).unwrap();
        }
        let layout = builder.finish();

        group.throughput(Throughput::Elements(layout.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(leds), &layout, |b, layout| {
            b.iter(|| adjacency::resolve(black_box(layout)))
        });
    }
    group.finish();
}

/// Benchmark Cartesian and polar quantization
fn bench_projection(c: &mut Criterion) {
    let layout = webb::build(LayoutConfig::default()).unwrap();
    c.bench_function("projection", |b| {
        b.iter(|| projection::project(black_box(&layout)))
    });
}

/// Benchmark writing the header into memory
fn bench_header(c: &mut Criterion) {
    let layout = webb::build(LayoutConfig::default()).unwrap();
    let table = LayoutTable::build(&layout).unwrap();
    c.bench_function("write_header", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            table.write_header(black_box(&mut out)).unwrap();
            out
        })
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_adjacency,
    bench_projection,
    bench_header,
);
criterion_main!(benches);
