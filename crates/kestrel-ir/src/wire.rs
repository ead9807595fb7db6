//! Serialized circuit format.
//!
//! A circuit travels as an ordered list of records, steps flattened:
//!
//! ```json
//! {"type": "phase_shift", "qubits": [0], "parameters": {"phi": 0.5}}
//! {"type": "readout", "qubits": [0], "parameters": {}, "bits": [0]}
//! ```
//!
//! Qubit and bit indices are 0-based on the wire. Type names come from a
//! [`SymbolRegistry`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::circuit::QuantumCircuit;
use crate::error::{IrError, IrResult};
use crate::gate::{GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{BitId, QubitId};
use crate::registry::SymbolRegistry;

/// One serialized instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireInstruction {
    /// Registered wire name of the instruction kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// 0-based qubit indices, controls first.
    pub qubits: Vec<u32>,
    /// Named parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// 0-based classical bits (readouts only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bits: Vec<u32>,
}

/// Payload submitted to a remote processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPayload {
    /// Number of repetitions.
    pub shot_count: u64,
    /// Instructions in execution order.
    pub circuit: Vec<WireInstruction>,
}

/// A circuit with its dimensions, used for files on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDocument {
    /// Optional circuit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of qubits.
    pub qubit_count: u32,
    /// Number of classical bits.
    #[serde(default)]
    pub bit_count: u32,
    /// Instructions in order.
    pub instructions: Vec<WireInstruction>,
}

/// Flatten `circuit` into wire records.
pub fn encode_instructions(
    circuit: &QuantumCircuit,
    registry: &SymbolRegistry,
) -> IrResult<Vec<WireInstruction>> {
    circuit
        .instructions()
        .map(|instruction| encode_instruction(instruction, registry))
        .collect()
}

fn encode_instruction(
    instruction: &Instruction,
    registry: &SymbolRegistry,
) -> IrResult<WireInstruction> {
    Ok(WireInstruction {
        kind: registry.wire_name(instruction)?.to_string(),
        qubits: instruction.qubits.iter().map(|q| q.0.saturating_sub(1)).collect(),
        parameters: instruction
            .parameters()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        bits: instruction.bits.iter().map(|b| b.0.saturating_sub(1)).collect(),
    })
}

/// Rebuild an instruction from a wire record.
pub fn decode_instruction(
    record: &WireInstruction,
    registry: &SymbolRegistry,
) -> IrResult<Instruction> {
    let kind = registry
        .kind_for_wire_name(&record.kind)
        .ok_or_else(|| IrError::UnknownWireType(record.kind.clone()))?;
    let qubits = record.qubits.iter().map(|q| QubitId::from_index(*q));

    if kind == "readout" {
        let instruction = Instruction {
            kind: InstructionKind::Readout,
            qubits: qubits.collect(),
            bits: record.bits.iter().map(|b| BitId::from_index(*b)).collect(),
        };
        instruction.validate()?;
        return Ok(instruction);
    }

    let gate: GateKind = match registry.custom_template(&record.kind) {
        Some(template) => {
            let mut gate = template.clone();
            gate.params = record
                .parameters
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect();
            gate.into()
        }
        None => StandardGate::from_parts(kind, &record.parameters)?.into(),
    };
    Instruction::gate(gate, qubits)
}

impl JobPayload {
    /// Serialize `circuit` for `shot_count` repetitions.
    pub fn new(circuit: &QuantumCircuit, shot_count: u64, registry: &SymbolRegistry) -> IrResult<Self> {
        Ok(Self {
            shot_count,
            circuit: encode_instructions(circuit, registry)?,
        })
    }

    /// JSON text of this payload.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl CircuitDocument {
    /// Capture a circuit.
    pub fn from_circuit(circuit: &QuantumCircuit, registry: &SymbolRegistry) -> IrResult<Self> {
        Ok(Self {
            name: circuit.name().map(str::to_string),
            qubit_count: circuit.qubit_count(),
            bit_count: circuit.bit_count(),
            instructions: encode_instructions(circuit, registry)?,
        })
    }

    /// Rebuild the circuit, packing instructions into steps.
    pub fn to_circuit(&self, registry: &SymbolRegistry) -> IrResult<QuantumCircuit> {
        let instructions = self
            .instructions
            .iter()
            .map(|record| decode_instruction(record, registry))
            .collect::<IrResult<Vec<_>>>()?;
        let circuit =
            QuantumCircuit::from_instructions(self.qubit_count, self.bit_count, instructions)?;
        Ok(match &self.name {
            Some(name) => circuit.with_name(name.clone()),
            None => circuit,
        })
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// JSON text of this document.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::CustomGate;
    use crate::registry::GateSymbols;

    #[test]
    fn test_payload_uses_zero_based_indices() {
        let circuit = QuantumCircuit::bell().unwrap();
        let payload = JobPayload::new(&circuit, 1000, &SymbolRegistry::standard()).unwrap();
        assert_eq!(payload.shot_count, 1000);
        assert_eq!(payload.circuit.len(), 4);
        assert_eq!(payload.circuit[1].kind, "control_x");
        assert_eq!(payload.circuit[1].qubits, vec![0, 1]);
        assert_eq!(payload.circuit[3].bits, vec![1]);
    }

    #[test]
    fn test_payload_json_shape() {
        let mut circuit = QuantumCircuit::new(1, 1);
        circuit
            .phase_shift(0.5, QubitId(1))
            .unwrap()
            .readout(QubitId(1), BitId(1))
            .unwrap();
        let payload = JobPayload::new(&circuit, 10, &SymbolRegistry::standard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["shot_count"], 10);
        assert_eq!(value["circuit"][0]["type"], "phase_shift");
        assert_eq!(value["circuit"][0]["parameters"]["phi"], 0.5);
        assert!(value["circuit"][0].get("bits").is_none());
        assert_eq!(value["circuit"][1]["bits"][0], 0);
    }

    #[test]
    fn test_unregistered_kind_fails() {
        let circuit = QuantumCircuit::bell().unwrap();
        let registry = SymbolRegistry::empty();
        assert!(matches!(
            JobPayload::new(&circuit, 1, &registry),
            Err(IrError::UnregisteredGate(_))
        ));
    }

    #[test]
    fn test_document_parses_back() {
        let registry = SymbolRegistry::standard();
        let text = r#"{
            "name": "demo",
            "qubit_count": 3,
            "bit_count": 1,
            "instructions": [
                {"type": "hadamard", "qubits": [0]},
                {"type": "toffoli", "qubits": [0, 1, 2]},
                {"type": "universal", "qubits": [2], "parameters": {"theta": 0.1, "phi": 0.2, "lambda": 0.3}},
                {"type": "readout", "qubits": [2], "bits": [0]}
            ]
        }"#;
        let circuit = CircuitDocument::from_json(text)
            .unwrap()
            .to_circuit(&registry)
            .unwrap();
        assert_eq!(circuit.name(), Some("demo"));
        assert_eq!(circuit.num_instructions(), 4);
        let toffoli = circuit.instructions().nth(1).unwrap();
        assert_eq!(toffoli.qubits, vec![QubitId(1), QubitId(2), QubitId(3)]);
        let again = CircuitDocument::from_circuit(&circuit, &registry).unwrap();
        assert_eq!(again.to_circuit(&registry).unwrap(), circuit);
    }

    #[test]
    fn test_decode_rejects_bad_records() {
        let registry = SymbolRegistry::standard();
        let unknown = WireInstruction {
            kind: "warp".into(),
            qubits: vec![0],
            parameters: BTreeMap::new(),
            bits: vec![],
        };
        assert!(matches!(
            decode_instruction(&unknown, &registry),
            Err(IrError::UnknownWireType(_))
        ));
        let short = WireInstruction {
            kind: "control_z".into(),
            qubits: vec![0],
            parameters: BTreeMap::new(),
            bits: vec![],
        };
        assert!(matches!(
            decode_instruction(&short, &registry),
            Err(IrError::QubitCountMismatch { .. })
        ));
    }

    #[test]
    fn test_custom_gate_round_trip() {
        let template = CustomGate::new("oracle", 2);
        let registry = SymbolRegistry::standard()
            .register_custom(template, GateSymbols::new("orc", &["O", "O"]));
        let record = WireInstruction {
            kind: "orc".into(),
            qubits: vec![1, 0],
            parameters: BTreeMap::from([("k".to_string(), 3.0)]),
            bits: vec![],
        };
        let instruction = decode_instruction(&record, &registry).unwrap();
        assert_eq!(instruction.name(), "oracle");
        assert_eq!(instruction.parameters(), vec![("k", 3.0)]);
    }
}
