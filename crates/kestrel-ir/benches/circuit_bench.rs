//! Benchmarks for Kestrel circuit operations
//!
//! Run with: cargo bench -p kestrel-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kestrel_ir::{
    Instruction, QuantumCircuit, QubitId, StandardGate, circuit_unitary, simulate,
};
use std::f64::consts::PI;

/// A layered circuit of rotations and CZ ladders.
fn layered(n: u32, layers: u32) -> Vec<Instruction> {
    let mut instructions = vec![];
    for layer in 0..layers {
        for q in 1..=n {
            let angle = PI / f64::from(q + layer + 1);
            instructions.push(Instruction::single(StandardGate::RotationX(angle), QubitId(q)));
        }
        for q in 1..n {
            instructions.push(Instruction::two(StandardGate::ControlZ, QubitId(q), QubitId(q + 1)));
        }
    }
    instructions
}

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = QuantumCircuit::new(10, 0);
        b.iter(|| {
            circuit.h(black_box(QubitId(1))).unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = QuantumCircuit::new(10, 0);
        b.iter(|| {
            circuit
                .cx(black_box(QubitId(1)), black_box(QubitId(2)))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark ASAP step packing
fn bench_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_instructions");

    for num_qubits in &[5u32, 20, 50] {
        let instructions = layered(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("layered", num_qubits),
            &instructions,
            |b, instructions| {
                b.iter(|| {
                    QuantumCircuit::from_instructions(*num_qubits, 0, black_box(instructions.clone()))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the dense engine
fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense");

    for num_qubits in &[4u32, 8, 12] {
        let circuit = QuantumCircuit::from_instructions(*num_qubits, 0, layered(*num_qubits, 4))
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("simulate", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| simulate(black_box(circuit)).unwrap());
            },
        );
    }

    for num_qubits in &[3u32, 5, 7] {
        let circuit = QuantumCircuit::from_instructions(*num_qubits, 0, layered(*num_qubits, 4))
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("unitary", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| circuit_unitary(black_box(circuit), *num_qubits).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gate_addition, bench_packing, bench_dense);
criterion_main!(benches);
