//! # Measurement Benchmarks
//!
//! Run: `cargo bench --bench measure_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qreg_core::prelude::*;
use qreg_core::random;

fn uniform(width: usize) -> QReg {
    let mut qreg = QReg::new(width).unwrap();
    hadamard_reg(&mut qreg).unwrap();
    qreg
}

fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    for width in [4usize, 8, 12, 16].iter() {
        let qreg = uniform(*width);
        let mut rng = random::seeded(7);

        group.bench_with_input(BenchmarkId::new("preserving", width), &qreg, |b, q| {
            b.iter(|| black_box(q.measure_preserving(&mut rng)))
        });
        group.bench_with_input(BenchmarkId::new("collapse", width), &qreg, |b, q| {
            b.iter(|| {
                let mut q = q.clone();
                black_box(q.measure(&mut rng))
            })
        });
    }

    group.finish();
}

fn bench_bit_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_ops");
    let qreg = uniform(12);

    group.bench_function("bit_probability", |b| {
        b.iter(|| black_box(qreg.bit_probability(black_box(5), 1).unwrap()))
    });
    group.bench_function("set_bit", |b| {
        b.iter(|| {
            let mut q = qreg.clone();
            q.set_bit(5, 1).unwrap();
            black_box(q)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_measure, bench_bit_ops);

criterion_main!(benches);
