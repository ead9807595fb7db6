//! Error types for the IR crate.

use crate::qubit::{BitId, QubitId};
use std::fmt;
use thiserror::Error;

/// Category of a failure, shared by every error type in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or gate lies outside what the circuit or device supports.
    Domain,
    /// The caller supplied an ill-formed request.
    Argument,
    /// The request is well-formed but the operation is not available for it.
    NotImplemented,
    /// An internal consistency condition does not hold.
    Assertion,
    /// Configuration could not be read or is inconsistent.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Domain => "domain",
            ErrorKind::Argument => "argument",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::Assertion => "assertion",
            ErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is outside `[1, qubit_count]`.
    #[error("Qubit {qubit} is outside the circuit's {qubit_count} qubits{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        qubit_count: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index is outside `[1, bit_count]`.
    #[error("Classical bit {bit} is outside the circuit's {bit_count} bits")]
    BitOutOfRange {
        /// The offending bit.
        bit: BitId,
        /// Number of classical bits in the circuit.
        bit_count: u32,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Two instructions of one step touch the same qubit or bit.
    #[error("Instructions '{first}' and '{second}' overlap on {wire} within one step")]
    OverlappingStep {
        /// Name of the earlier instruction.
        first: String,
        /// Name of the later instruction.
        second: String,
        /// The shared qubit or bit.
        wire: String,
    },

    /// A readout must name exactly one qubit and one bit.
    #[error("Readout requires one qubit and one bit, got {qubits} qubits and {bits} bits")]
    MalformedReadout {
        /// Qubits supplied.
        qubits: usize,
        /// Bits supplied.
        bits: usize,
    },

    /// The instruction has no inverse available.
    #[error("Inverse of '{0}' is not implemented")]
    NotInvertible(String),

    /// The instruction has no unitary operator.
    #[error("Instruction '{0}' has no operator")]
    NoOperator(String),

    /// A user-supplied matrix has the wrong size.
    #[error("Matrix for '{gate_name}' must have {expected} entries, got {got}")]
    InvalidMatrix {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        got: usize,
    },

    /// A controlled gate needs a gate kernel and at least one control.
    #[error("Invalid controlled gate: {0}")]
    InvalidControlled(String),

    /// The dense engine refuses circuits wider than its limit.
    #[error("Dense operator over {qubit_count} qubits exceeds the limit of {max}")]
    TooManyQubits {
        /// Requested width.
        qubit_count: u32,
        /// Supported width.
        max: u32,
    },

    /// A Pauli group operation received incompatible operands.
    #[error("Invalid Pauli operation: {0}")]
    InvalidPauli(String),

    /// The symbol registry has no wire name for this gate.
    #[error("Gate '{0}' is not registered for serialization")]
    UnregisteredGate(String),

    /// The wire format names a type the registry does not know.
    #[error("Unknown wire type '{0}'")]
    UnknownWireType(String),

    /// A wire record lacks a required parameter.
    #[error("Wire record '{kind}' is missing parameter '{parameter}'")]
    MissingParameter {
        /// Wire type of the record.
        kind: String,
        /// Name of the missing parameter.
        parameter: String,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IrError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IrError::QubitOutOfRange { .. }
            | IrError::BitOutOfRange { .. }
            | IrError::TooManyQubits { .. } => ErrorKind::Domain,
            IrError::NotInvertible(_) => ErrorKind::NotImplemented,
            IrError::QubitCountMismatch { .. }
            | IrError::DuplicateQubit { .. }
            | IrError::OverlappingStep { .. }
            | IrError::MalformedReadout { .. }
            | IrError::NoOperator(_)
            | IrError::InvalidMatrix { .. }
            | IrError::InvalidControlled(_)
            | IrError::InvalidPauli(_)
            | IrError::UnregisteredGate(_)
            | IrError::UnknownWireType(_)
            | IrError::MissingParameter { .. }
            | IrError::Serialization(_) => ErrorKind::Argument,
        }
    }
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
