//! Circuits as ordered sequences of parallel steps.

use rustc_hash::FxHashMap;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{BitId, QubitId};

/// A quantum circuit.
///
/// Instructions are grouped into steps. The instructions of one step act on
/// pairwise-disjoint qubits and bits and are issued in logical parallel.
#[derive(Debug, Clone)]
pub struct QuantumCircuit {
    name: Option<String>,
    qubit_count: u32,
    bit_count: u32,
    steps: Vec<Vec<Instruction>>,
}

/// A qubit or classical bit touched by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Wire {
    Qubit(QubitId),
    Bit(BitId),
}

fn wires(instruction: &Instruction) -> impl Iterator<Item = Wire> + '_ {
    instruction
        .qubits
        .iter()
        .map(|q| Wire::Qubit(*q))
        .chain(instruction.bits.iter().map(|b| Wire::Bit(*b)))
}

impl QuantumCircuit {
    /// Create an empty circuit.
    pub fn new(qubit_count: u32, bit_count: u32) -> Self {
        Self {
            name: None,
            qubit_count,
            bit_count,
            steps: vec![],
        }
    }

    /// Attach a name to the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Pack `instructions` into steps as soon as possible.
    ///
    /// Each instruction lands one step after the last step touching any of
    /// its qubits or bits, so the order on every wire is preserved.
    pub fn from_instructions(
        qubit_count: u32,
        bit_count: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(qubit_count, bit_count);
        let mut next_free: FxHashMap<Wire, usize> = FxHashMap::default();
        for instruction in instructions {
            circuit.check(&instruction)?;
            let step = wires(&instruction)
                .filter_map(|w| next_free.get(&w).copied())
                .max()
                .unwrap_or(0);
            for wire in wires(&instruction) {
                next_free.insert(wire, step + 1);
            }
            if step == circuit.steps.len() {
                circuit.steps.push(vec![instruction]);
            } else {
                circuit.steps[step].push(instruction);
            }
        }
        Ok(circuit)
    }

    /// Same name and widths, new contents.
    pub fn rebuild(&self, instructions: impl IntoIterator<Item = Instruction>) -> IrResult<Self> {
        self.rebuild_with_width(self.qubit_count, instructions)
    }

    /// Same name and bit count, new qubit count and contents.
    pub fn rebuild_with_width(
        &self,
        qubit_count: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::from_instructions(qubit_count, self.bit_count, instructions)?;
        circuit.name.clone_from(&self.name);
        Ok(circuit)
    }

    /// Validate an instruction against this circuit's bounds.
    pub fn check(&self, instruction: &Instruction) -> IrResult<()> {
        instruction.validate()?;
        if let Some(q) = instruction
            .qubits
            .iter()
            .find(|q| q.0 == 0 || q.0 > self.qubit_count)
        {
            return Err(IrError::QubitOutOfRange {
                qubit: *q,
                qubit_count: self.qubit_count,
                gate_name: Some(instruction.name().to_string()),
            });
        }
        if let Some(b) = instruction
            .bits
            .iter()
            .find(|b| b.0 == 0 || b.0 > self.bit_count)
        {
            return Err(IrError::BitOutOfRange {
                bit: *b,
                bit_count: self.bit_count,
            });
        }
        Ok(())
    }

    /// Add a new step holding `instructions`.
    pub fn append(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        let step: Vec<Instruction> = instructions.into_iter().collect();
        let mut owners: FxHashMap<Wire, &str> = FxHashMap::default();
        for instruction in &step {
            self.check(instruction)?;
            for wire in wires(instruction) {
                if let Some(first) = owners.insert(wire, instruction.name()) {
                    return Err(IrError::OverlappingStep {
                        first: first.to_string(),
                        second: instruction.name().to_string(),
                        wire: match wire {
                            Wire::Qubit(q) => q.to_string(),
                            Wire::Bit(b) => b.to_string(),
                        },
                    });
                }
            }
        }
        if !step.is_empty() {
            self.steps.push(step);
        }
        Ok(self)
    }

    /// Add one instruction at the earliest step after its wires are free.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        let touched: Vec<Wire> = wires(&instruction).collect();
        let step = self
            .steps
            .iter()
            .rposition(|s| s.iter().flat_map(wires).any(|w| touched.contains(&w)))
            .map_or(0, |last| last + 1);
        if step == self.steps.len() {
            self.steps.push(vec![instruction]);
        } else {
            self.steps[step].push(instruction);
        }
        Ok(self)
    }

    /// Remove and return the last step.
    pub fn pop(&mut self) -> Option<Vec<Instruction>> {
        self.steps.pop()
    }

    /// The circuit run backwards with every instruction inverted.
    ///
    /// Fails if the circuit contains a readout.
    pub fn inverse(&self) -> IrResult<Self> {
        let steps = self
            .steps
            .iter()
            .rev()
            .map(|step| step.iter().map(Instruction::inverse).collect())
            .collect::<IrResult<Vec<Vec<_>>>>()?;
        Ok(Self {
            name: self.name.clone(),
            qubit_count: self.qubit_count,
            bit_count: self.bit_count,
            steps,
        })
    }

    // =========================================================================
    // Gate helpers
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::Hadamard, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::SigmaX, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::SigmaY, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::SigmaZ, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::Phase, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::Pi8, qubit))
    }

    /// Apply RX rotation.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::RotationX(theta), qubit))
    }

    /// Apply RY rotation.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::RotationY(theta), qubit))
    }

    /// Apply RZ rotation.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::RotationZ(theta), qubit))
    }

    /// Apply a phase shift.
    pub fn phase_shift(&mut self, phi: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(StandardGate::PhaseShift(phi), qubit))
    }

    /// Apply U(θ, φ, λ).
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single(
            StandardGate::Universal(theta, phi, lambda),
            qubit,
        ))
    }

    /// Apply CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two(StandardGate::ControlX, control, target))
    }

    /// Apply CZ.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two(StandardGate::ControlZ, control, target))
    }

    /// Apply SWAP.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two(StandardGate::Swap, q1, q2))
    }

    /// Apply iSWAP.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two(StandardGate::ISwap, q1, q2))
    }

    /// Apply Toffoli.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::three(StandardGate::Toffoli, c1, c2, target))
    }

    /// Read `qubit` into `bit`.
    pub fn readout(&mut self, qubit: QubitId, bit: BitId) -> IrResult<&mut Self> {
        self.push(Instruction::readout(qubit, bit))
    }

    /// Read every qubit `q` into bit `q`, as one final step.
    pub fn readout_all(&mut self) -> IrResult<&mut Self> {
        let readouts: Vec<_> = (1..=self.qubit_count)
            .map(|i| Instruction::readout(QubitId(i), BitId(i)))
            .collect();
        self.append(readouts)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of qubits.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Number of classical bits.
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// The steps in order.
    pub fn steps(&self) -> &[Vec<Instruction>] {
        &self.steps
    }

    /// Number of steps.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Whether the circuit holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(Vec::is_empty)
    }

    /// All instructions, step by step.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.steps.iter().flatten()
    }

    /// Total number of instructions.
    pub fn num_instructions(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }

    /// All readouts, step by step.
    pub fn readouts(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions().filter(|i| i.is_readout())
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2, 2).with_name("bell");
        circuit
            .h(QubitId(1))?
            .cx(QubitId(1), QubitId(2))?
            .readout_all()?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit on `n` qubits.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new(n, n).with_name("ghz");
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(1))?;
        for i in 1..n {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.readout_all()?;
        Ok(circuit)
    }
}

impl PartialEq for QuantumCircuit {
    fn eq(&self, other: &Self) -> bool {
        self.qubit_count == other.qubit_count
            && self.bit_count == other.bit_count
            && self.instructions().eq(other.instructions())
    }
}
