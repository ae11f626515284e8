//! Benchmarks for the marching-squares phases and the full pipeline.
//!
//! Run with: cargo bench --package marching --bench marching_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use contour_common::MarchConfig;
use marching::{march_grid, rescale, sample_grid, ContourTileSet, Coordinator};
use test_utils::{disc_bitmap, indexed_tiles, noise_bitmap};

// =============================================================================
// SINGLE-THREADED PHASES
// =============================================================================

fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rescale");
    group.sample_size(10);

    for size in [512usize, 1024] {
        let source = noise_bitmap(size * 2, size * 2, 17);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| rescale(black_box(&source), size, size).unwrap())
        });
    }

    group.finish();
}

fn bench_sample_and_march(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_and_march");
    let config = MarchConfig::default();
    let tiles = ContourTileSet::from_tiles(indexed_tiles(8, 8)).unwrap();

    for size in [256usize, 1024, 2048] {
        let source = disc_bitmap(size, size, size as f32 / 3.0);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("sample", size), &source, |b, source| {
            b.iter(|| sample_grid(black_box(source), &config).unwrap())
        });

        let grid = sample_grid(&source, &config).unwrap();
        group.bench_with_input(BenchmarkId::new("march", size), &source, |b, source| {
            b.iter_batched(
                || source.clone(),
                |mut working| march_grid(&grid, &tiles, &mut working),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// =============================================================================
// FULL PIPELINE SCALING
// =============================================================================

fn bench_pipeline_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_workers");
    group.sample_size(10);

    let tiles = ContourTileSet::from_tiles(indexed_tiles(8, 8)).unwrap();
    let source = disc_bitmap(2560, 2560, 900.0);

    for workers in [1usize, 2, 4, 8] {
        let coordinator = Coordinator::new(MarchConfig::default(), workers).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter_batched(
                || source.clone(),
                |source| coordinator.run(source, &tiles).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rescale,
    bench_sample_and_march,
    bench_pipeline_workers
);
criterion_main!(benches);
