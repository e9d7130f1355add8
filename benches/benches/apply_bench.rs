//! # Gate Application Benchmarks
//!
//! Measures the tensor-contraction engine for growing registers, on both
//! the sequential and the rayon path.
//!
//! Run: `cargo bench --bench apply_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qreg_core::prelude::*;
use qreg_core::contract::apply_with;

/// Hadamard de 1 qubit no qubit do meio
fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_single_qubit");
    let h = Hadamard::new(1).unwrap();

    for width in [8usize, 12, 16].iter() {
        let qreg = QReg::new(*width).unwrap();
        let targets = [*width / 2];

        for (label, config) in [
            ("sequential", SimConfig::sequential()),
            ("parallel", SimConfig { parallel_threshold: 1, ..SimConfig::default() }),
        ] {
            group.bench_with_input(BenchmarkId::new(label, width), &qreg, |b, q| {
                b.iter(|| {
                    let mut q = q.clone();
                    apply_with(&h, &mut q, &targets, &config).unwrap();
                    black_box(q)
                })
            });
        }
    }

    group.finish();
}

/// Gates de k qubits num registrador de 12
fn bench_gate_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_gate_size");
    let qreg = QReg::new(12).unwrap();

    for bits in [1usize, 2, 3, 4].iter() {
        let d = Diffusion::new(*bits).unwrap();
        group.bench_with_input(BenchmarkId::new("diffusion", bits), &qreg, |b, q| {
            b.iter(|| {
                let mut q = q.clone();
                d.apply_range(&mut q, 2).unwrap();
                black_box(q)
            })
        });
    }

    group.finish();
}

/// Oráculo clássico sobre o registrador inteiro
fn bench_classical_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_classical");

    for width in [4usize, 6, 8].iter() {
        let oracle = ClassicalGate::new(|x| x ^ 1, *width).unwrap();
        let mut qreg = QReg::new(*width).unwrap();
        hadamard_reg(&mut qreg).unwrap();

        group.bench_with_input(BenchmarkId::new("xor_low_bit", width), &qreg, |b, q| {
            b.iter(|| {
                let mut q = q.clone();
                oracle.apply_whole(&mut q).unwrap();
                black_box(q)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_qubit,
    bench_gate_size,
    bench_classical_oracle,
);

criterion_main!(benches);
