//! Benchmarks for Kestrel transpilation
//!
//! Run with: cargo bench -p kestrel-transpile

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kestrel_ir::{QuantumCircuit, QubitId};
use kestrel_transpile::{
    CompressSingleQubitGatesTranspiler, Connectivity, PipelineBuilder,
    SwapQubitsForAdjacencyTranspiler, Transpiler, compare_circuits,
};

/// H on every qubit, then CX from qubit 1 to every other qubit.
fn star(n: u32) -> QuantumCircuit {
    let mut circuit = QuantumCircuit::new(n, n);
    for i in 1..=n {
        circuit.h(QubitId(i)).unwrap();
    }
    for target in 2..=n {
        circuit.cx(QubitId(1), QubitId(target)).unwrap();
    }
    circuit.readout_all().unwrap();
    circuit
}

/// Benchmark the standard pipeline on a line device
fn bench_standard_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("standard_pipeline");

    for n in [4, 8, 16, 32] {
        let pipeline = PipelineBuilder::new(Connectivity::line(n)).build();
        let ghz = QuantumCircuit::ghz(n).unwrap();
        group.bench_with_input(BenchmarkId::new("ghz", n), &ghz, |b, circuit| {
            b.iter(|| pipeline.transpile(black_box(circuit)).unwrap());
        });

        let star = star(n);
        group.bench_with_input(BenchmarkId::new("star", n), &star, |b, circuit| {
            b.iter(|| pipeline.transpile(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark routing alone on lattices
fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");

    for side in [3, 5, 8] {
        let n = side * side;
        let pass = SwapQubitsForAdjacencyTranspiler::new(Connectivity::lattice(side, side));
        let circuit = star(n);
        group.bench_with_input(BenchmarkId::new("star_on_lattice", n), &circuit, |b, circuit| {
            b.iter(|| pass.transpile(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark single-qubit compression
fn bench_compression(c: &mut Criterion) {
    let pass = CompressSingleQubitGatesTranspiler::new();
    let mut circuit = QuantumCircuit::new(16, 0);
    for layer in 0..64 {
        for i in 1..=16 {
            circuit.rx(f64::from(layer) * 0.1, QubitId(i)).unwrap();
            circuit.t(QubitId(i)).unwrap();
        }
    }

    c.bench_function("compress_16x128", |b| {
        b.iter(|| pass.transpile(black_box(&circuit)).unwrap());
    });
}

/// Benchmark the dense equivalence check
fn bench_equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalence");
    group.sample_size(10);

    for n in [4, 6, 8] {
        let circuit = QuantumCircuit::ghz(n).unwrap();
        let native = PipelineBuilder::new(Connectivity::line(n))
            .build()
            .transpile(&circuit)
            .unwrap();
        group.bench_with_input(BenchmarkId::new("ghz", n), &n, |b, _| {
            b.iter(|| compare_circuits(black_box(&circuit), black_box(&native)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_standard_pipeline,
    bench_routing,
    bench_compression,
    bench_equivalence,
);
criterion_main!(benches);
