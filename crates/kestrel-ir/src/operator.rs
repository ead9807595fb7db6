//! Dense reference engine for operators and state vectors.
//!
//! Qubit `q` is bit `q - 1` of a basis-state index. A gate operator indexes
//! its own basis with the first listed qubit as the most significant bit.
//! The engine favours clarity over speed and refuses circuits wider than
//! [`MAX_DENSE_QUBITS`].

use ndarray::Array2;
use num_complex::Complex64;

use crate::circuit::QuantumCircuit;
use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// Dense complex matrix.
pub type Operator = Array2<Complex64>;

/// Widest circuit the dense engine accepts.
pub const MAX_DENSE_QUBITS: u32 = 14;

/// A pure state over `qubit_count` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
    qubit_count: u32,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩.
    pub fn new(qubit_count: u32) -> IrResult<Self> {
        check_width(qubit_count)?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << qubit_count];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            qubit_count,
        })
    }

    /// Basis state `|index⟩`.
    pub fn basis(qubit_count: u32, index: usize) -> IrResult<Self> {
        let mut state = Self::new(qubit_count)?;
        if index >= state.amplitudes.len() {
            return Err(IrError::QubitOutOfRange {
                qubit: QubitId::from_index(qubit_count),
                qubit_count,
                gate_name: None,
            });
        }
        state.amplitudes[0] = Complex64::new(0.0, 0.0);
        state.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(state)
    }

    /// Number of qubits.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Amplitudes indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Measurement probabilities indexed by basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction. Readouts leave the state untouched.
    pub fn apply(&mut self, instruction: &Instruction) -> IrResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                if let Some(q) = instruction
                    .qubits
                    .iter()
                    .find(|q| q.index() >= self.qubit_count as usize)
                {
                    return Err(IrError::QubitOutOfRange {
                        qubit: *q,
                        qubit_count: self.qubit_count,
                        gate_name: Some(gate.name().to_string()),
                    });
                }
                let op = gate.operator()?;
                apply_operator(&mut self.amplitudes, &op, &instruction.qubits);
                Ok(())
            }
            InstructionKind::Readout => Ok(()),
        }
    }
}

fn check_width(qubit_count: u32) -> IrResult<()> {
    if qubit_count > MAX_DENSE_QUBITS {
        return Err(IrError::TooManyQubits {
            qubit_count,
            max: MAX_DENSE_QUBITS,
        });
    }
    Ok(())
}

/// Apply a k-qubit operator to `amplitudes` in place.
///
/// `operator` must be `2^k × 2^k` with `k == qubits.len()`.
pub fn apply_operator(amplitudes: &mut [Complex64], operator: &Operator, qubits: &[QubitId]) {
    let k = qubits.len();
    let dim = 1usize << k;
    let masks: Vec<usize> = qubits.iter().map(|q| 1usize << q.index()).collect();
    let touched = masks.iter().fold(0, |acc, m| acc | m);

    // Offset of each operator basis state within the full index.
    let offsets: Vec<usize> = (0..dim)
        .map(|sub| {
            masks
                .iter()
                .enumerate()
                .filter(|(pos, _)| (sub >> (k - 1 - pos)) & 1 == 1)
                .fold(0, |acc, (_, m)| acc | m)
        })
        .collect();

    let mut gathered = vec![Complex64::new(0.0, 0.0); dim];
    for base in 0..amplitudes.len() {
        if base & touched != 0 {
            continue;
        }
        for (slot, offset) in gathered.iter_mut().zip(&offsets) {
            *slot = amplitudes[base | offset];
        }
        for (row, offset) in offsets.iter().enumerate() {
            amplitudes[base | offset] = gathered
                .iter()
                .enumerate()
                .map(|(col, amp)| operator[[row, col]] * amp)
                .sum();
        }
    }
}

/// Run `circuit` from |0...0⟩, ignoring readouts.
pub fn simulate(circuit: &QuantumCircuit) -> IrResult<StateVector> {
    let mut state = StateVector::new(circuit.qubit_count())?;
    for instruction in circuit.instructions() {
        state.apply(instruction)?;
    }
    Ok(state)
}

/// Unitary of the circuit's gates over `qubit_count` qubits.
///
/// `qubit_count` may exceed the circuit's own width; extra qubits are idle.
pub fn circuit_unitary(circuit: &QuantumCircuit, qubit_count: u32) -> IrResult<Operator> {
    check_width(qubit_count)?;
    if qubit_count < circuit.qubit_count() {
        return Err(IrError::QubitOutOfRange {
            qubit: QubitId(circuit.qubit_count()),
            qubit_count,
            gate_name: None,
        });
    }

    let dim = 1usize << qubit_count;
    let mut unitary = Array2::zeros((dim, dim));
    for col in 0..dim {
        let mut state = StateVector::basis(qubit_count, col)?;
        for instruction in circuit.instructions() {
            state.apply(instruction)?;
        }
        for (row, amp) in state.amplitudes.iter().enumerate() {
            unitary[[row, col]] = *amp;
        }
    }
    Ok(unitary)
}

/// Whether `a == e^{iα}·b` for some global phase `α`, within `tolerance`.
pub fn equal_up_to_global_phase(a: &Operator, b: &Operator, tolerance: f64) -> bool {
    if a.dim() != b.dim() {
        return false;
    }

    // Fix the phase at the largest entry of `b` for numerical stability.
    let Some((pivot, _)) = b
        .indexed_iter()
        .max_by(|(_, x), (_, y)| x.norm().total_cmp(&y.norm()))
    else {
        return true;
    };
    if b[pivot].norm() <= tolerance {
        return a.iter().all(|x| x.norm() <= tolerance);
    }
    let ratio = a[pivot] / b[pivot];
    if (ratio.norm() - 1.0).abs() > tolerance {
        return false;
    }

    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x - ratio * y).norm() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = StateVector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes()[1..].iter().all(|a| a.norm() < 1e-12));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = StateVector::new(1).unwrap();
        sv.apply(&Instruction::single(StandardGate::Hadamard, QubitId(1)))
            .unwrap();
        let expected = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], expected));
        assert!(approx_eq(sv.amplitudes()[1], expected));
    }

    #[test]
    fn test_bell_state() {
        let circuit = QuantumCircuit::bell().unwrap();
        let sv = simulate(&circuit).unwrap();
        let p = sv.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-10);
        assert!((p[3] - 0.5).abs() < 1e-10);
        assert!(p[1].abs() < 1e-10 && p[2].abs() < 1e-10);
    }

    #[test]
    fn test_qubit_one_is_least_significant() {
        let mut sv = StateVector::new(3).unwrap();
        sv.apply(&Instruction::single(StandardGate::SigmaX, QubitId(1)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_first_listed_qubit_controls() {
        // X on q3 then CX(q3, q1) sets both: index 0b101.
        let mut sv = StateVector::new(3).unwrap();
        sv.apply(&Instruction::single(StandardGate::SigmaX, QubitId(3)))
            .unwrap();
        sv.apply(&Instruction::two(StandardGate::ControlX, QubitId(3), QubitId(1)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes()[0b101], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_circuit_unitary_widens() {
        let mut circuit = QuantumCircuit::new(1, 0);
        circuit
            .push(Instruction::single(StandardGate::SigmaX, QubitId(1)))
            .unwrap();
        let u = circuit_unitary(&circuit, 2).unwrap();
        assert_eq!(u.dim(), (4, 4));
        assert!(approx_eq(u[[1, 0]], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(u[[3, 2]], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_too_wide_rejected() {
        assert!(matches!(
            StateVector::new(MAX_DENSE_QUBITS + 1),
            Err(IrError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_global_phase_comparison() {
        let z = StandardGate::SigmaZ.operator().unwrap();
        let rz = StandardGate::RotationZ(std::f64::consts::PI).operator().unwrap();
        assert!(equal_up_to_global_phase(&z, &rz, 1e-9));
        let x = StandardGate::SigmaX.operator().unwrap();
        assert!(!equal_up_to_global_phase(&z, &x, 1e-9));
    }
}
