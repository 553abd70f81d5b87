//! # Arena Benchmark
//!
//! Measures:
//! 1. Raw bump allocation, per request size
//! 2. Zeroed allocation
//! 3. String duplication and formatted strings
//! 4. Fill-then-reset cycles (request-scoped usage)

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linear_arena::{arena_format, Arena};

const POOL_SIZE: usize = 64 * 1024;

/// Benchmark a single allocation per iteration, resetting when full
fn bench_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_alloc");

    for size in [8usize, 64, 512] {
        let mut pool = vec![0u8; POOL_SIZE];
        let mut arena = Arena::new(&mut pool).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("alloc", size), &size, |b, &size| {
            b.iter(|| {
                if arena.alloc(black_box(size)).is_err() {
                    arena.reset();
                }
            });
        });
    }

    group.finish();
}

/// Benchmark zeroed allocation
fn bench_calloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_calloc");

    for count in [4usize, 64, 1024] {
        let mut pool = vec![0u8; POOL_SIZE];
        let mut arena = Arena::new(&mut pool).unwrap();

        group.bench_with_input(BenchmarkId::new("calloc_i32", count), &count, |b, &count| {
            b.iter(|| {
                if arena.calloc(black_box(count), 4).is_err() {
                    arena.reset();
                }
            });
        });
    }

    group.finish();
}

/// Benchmark string helpers
fn bench_strings(c: &mut Criterion) {
    let mut pool = vec![0u8; POOL_SIZE];
    let mut arena = Arena::new(&mut pool).unwrap();

    c.bench_function("strdup_hello", |b| {
        b.iter(|| {
            if arena.strdup(black_box(b"hello, world")).is_err() {
                arena.reset();
            }
        });
    });

    c.bench_function("format_num", |b| {
        b.iter(|| {
            if arena_format!(arena, "num={}", black_box(42)).is_err() {
                arena.reset();
            }
        });
    });
}

/// Benchmark a request-sized fill followed by a reset
fn bench_fill_reset(c: &mut Criterion) {
    let mut pool = vec![0u8; POOL_SIZE];
    let mut arena = Arena::new(&mut pool).unwrap();

    c.bench_function("fill_then_reset_64k", |b| {
        b.iter(|| {
            while arena.alloc(black_box(48)).is_ok() {}
            arena.reset();
        });
    });
}

criterion_group!(benches, bench_alloc, bench_calloc, bench_strings, bench_fill_reset);
criterion_main!(benches);
