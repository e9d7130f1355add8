//! # Unitarity Check Benchmarks
//!
//! The Gram check is O(8^k) for a k-qubit gate.
//!
//! Run: `cargo bench --bench unitary_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qreg_core::prelude::*;
use qreg_core::unitary::is_unitary;

fn bench_standard_gates(c: &mut Criterion) {
    let mut group = c.benchmark_group("unitary_standard");

    for bits in [1usize, 2, 3, 4, 5].iter() {
        let h = Hadamard::new(*bits).unwrap();
        let d = Diffusion::new(*bits).unwrap();

        group.bench_with_input(BenchmarkId::new("hadamard", bits), &h, |b, g| {
            b.iter(|| black_box(is_unitary(g, &SimConfig::sequential())))
        });
        group.bench_with_input(BenchmarkId::new("diffusion", bits), &d, |b, g| {
            b.iter(|| black_box(is_unitary(g, &SimConfig::sequential())))
        });
    }

    group.finish();
}

fn bench_parallel_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("unitary_parallel");
    let h = Hadamard::new(5).unwrap();

    for (label, config) in [
        ("sequential", SimConfig::sequential()),
        ("parallel", SimConfig { parallel_threshold: 1, ..SimConfig::default() }),
    ] {
        group.bench_function(label, |b| b.iter(|| black_box(is_unitary(&h, &config))));
    }

    group.finish();
}

criterion_group!(benches, bench_standard_gates, bench_parallel_check);

criterion_main!(benches);
