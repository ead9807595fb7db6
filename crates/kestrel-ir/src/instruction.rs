//! Circuit instructions combining gates with operands.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateKind, StandardGate};
use crate::operator::Operator;
use crate::qubit::{BitId, QubitId};
use crate::unitary::Unitary2x2;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary gate.
    Gate(GateKind),
    /// Measurement of one qubit into one classical bit.
    Readout,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on, controls before targets.
    pub qubits: Vec<QubitId>,
    /// Classical bits written by this instruction (readouts only).
    pub bits: Vec<BitId>,
}

impl Instruction {
    /// Create a gate instruction, checking arity and distinct qubits.
    pub fn gate(
        gate: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let instruction = Self::gate_unchecked(gate, qubits);
        instruction.validate()?;
        Ok(instruction)
    }

    fn gate_unchecked(gate: impl Into<GateKind>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            bits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate_unchecked(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate_unchecked(gate, [q1, q2])
    }

    /// Create a three-qubit gate instruction.
    pub fn three(gate: StandardGate, q1: QubitId, q2: QubitId, q3: QubitId) -> Self {
        Self::gate_unchecked(gate, [q1, q2, q3])
    }

    /// Create a readout of `qubit` into `bit`.
    pub fn readout(qubit: QubitId, bit: BitId) -> Self {
        Self {
            kind: InstructionKind::Readout,
            qubits: vec![qubit],
            bits: vec![bit],
        }
    }

    /// Wrap a gate instruction so it only acts when every control is set.
    ///
    /// The controls precede the kernel's qubits in the result.
    pub fn controlled(
        kernel: Instruction,
        controls: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let InstructionKind::Gate(gate) = kernel.kind else {
            return Err(IrError::InvalidControlled(
                "readout cannot be controlled".into(),
            ));
        };
        let mut qubits: Vec<QubitId> = controls.into_iter().collect();
        if qubits.is_empty() {
            return Err(IrError::InvalidControlled(
                "at least one control qubit is required".into(),
            ));
        }
        let num_controls = qubits.len() as u32;
        qubits.extend(kernel.qubits);
        let controlled = StandardGate::Controlled {
            kernel: Box::new(gate),
            num_controls,
        };
        Self::gate(controlled, qubits)
    }

    /// Check arity, distinct qubits, and the readout shape.
    pub fn validate(&self) -> IrResult<()> {
        match &self.kind {
            InstructionKind::Readout => {
                if self.qubits.len() != 1 || self.bits.len() != 1 {
                    return Err(IrError::MalformedReadout {
                        qubits: self.qubits.len(),
                        bits: self.bits.len(),
                    });
                }
            }
            InstructionKind::Gate(gate) => {
                if self.qubits.len() != gate.num_qubits() as usize || !self.bits.is_empty() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got: self.qubits.len() as u32,
                    });
                }
                let mut seen = FxHashSet::default();
                if let Some(q) = self.qubits.iter().find(|q| !seen.insert(**q)) {
                    return Err(IrError::DuplicateQubit {
                        qubit: *q,
                        gate_name: Some(gate.name().to_string()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check if this is a readout.
    pub fn is_readout(&self) -> bool {
        matches!(self.kind, InstructionKind::Readout)
    }

    /// Check if this is a gate on exactly one qubit.
    pub fn is_single_qubit_gate(&self) -> bool {
        self.is_gate() && self.qubits.len() == 1
    }

    /// Check if this is a gate.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&GateKind> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Readout => None,
        }
    }

    /// Get the standard gate if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        self.as_gate().and_then(GateKind::as_standard)
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Readout => "readout",
        }
    }

    /// Named parameters; empty for readouts.
    pub fn parameters(&self) -> Vec<(&str, f64)> {
        self.as_gate().map(GateKind::parameters).unwrap_or_default()
    }

    /// Dense operator over the instruction's own qubits.
    pub fn operator(&self) -> IrResult<Operator> {
        match &self.kind {
            InstructionKind::Gate(g) => g.operator(),
            InstructionKind::Readout => Err(IrError::NoOperator("readout".into())),
        }
    }

    /// 2x2 matrix of a single-qubit gate.
    pub fn unitary(&self) -> Option<Unitary2x2> {
        self.as_gate().and_then(GateKind::unitary)
    }

    /// The inverse instruction on the same qubits.
    pub fn inverse(&self) -> IrResult<Self> {
        match &self.kind {
            InstructionKind::Gate(g) => Ok(Self {
                kind: InstructionKind::Gate(g.inverse()?),
                qubits: self.qubits.clone(),
                bits: vec![],
            }),
            InstructionKind::Readout => Err(IrError::NotInvertible("readout".into())),
        }
    }

    /// The same operation on other qubits.
    #[must_use]
    pub fn with_qubits(&self, qubits: Vec<QubitId>) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits,
            bits: self.bits.clone(),
        }
    }
}
