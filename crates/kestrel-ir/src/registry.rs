//! Wire names and display symbols per gate kind.
//!
//! A [`SymbolRegistry`] is an ordinary value passed to the serializer and
//! the renderer. Registration consumes the registry and returns the
//! extended one, so a registry can be built up in a single expression.

use rustc_hash::FxHashMap;

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};

/// How one gate kind is named on the wire and drawn in diagrams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSymbols {
    /// Type tag used in serialized payloads.
    pub wire_name: String,
    /// One diagram label per connected qubit.
    pub display: Vec<String>,
}

impl GateSymbols {
    /// Create symbols from a wire name and per-qubit labels.
    pub fn new(wire_name: impl Into<String>, display: &[&str]) -> Self {
        Self {
            wire_name: wire_name.into(),
            display: display.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Registry mapping gate kind names to their symbols.
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    entries: FxHashMap<String, GateSymbols>,
    templates: FxHashMap<String, CustomGate>,
}

const STANDARD_SYMBOLS: &[(&str, &[&str])] = &[
    ("identity", &["I"]),
    ("sigma_x", &["X"]),
    ("sigma_y", &["Y"]),
    ("sigma_z", &["Z"]),
    ("hadamard", &["H"]),
    ("phase", &["S"]),
    ("phase_dagger", &["S†"]),
    ("pi_8", &["T"]),
    ("pi_8_dagger", &["T†"]),
    ("x_90", &["X90"]),
    ("x_minus_90", &["X-90"]),
    ("y_90", &["Y90"]),
    ("y_minus_90", &["Y-90"]),
    ("z_90", &["Z90"]),
    ("z_minus_90", &["Z-90"]),
    ("rotation_x", &["Rx"]),
    ("rotation_y", &["Ry"]),
    ("rotation_z", &["Rz"]),
    ("phase_shift", &["Ph"]),
    ("rotation", &["R"]),
    ("universal", &["U"]),
    ("control_z", &["*", "Z"]),
    ("control_x", &["*", "X"]),
    ("swap", &["x", "x"]),
    ("iswap", &["iS", "iS"]),
    ("iswap_dagger", &["iS†", "iS†"]),
    ("toffoli", &["*", "*", "X"]),
    ("readout", &["M"]),
];

impl SymbolRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every standard gate kind and readout, with wire names equal to the
    /// kind names.
    pub fn standard() -> Self {
        STANDARD_SYMBOLS
            .iter()
            .fold(Self::empty(), |registry, (kind, display)| {
                registry.register(*kind, GateSymbols::new(*kind, display))
            })
    }

    /// Add or replace the symbols of a gate kind.
    #[must_use]
    pub fn register(mut self, kind: impl Into<String>, symbols: GateSymbols) -> Self {
        self.entries.insert(kind.into(), symbols);
        self
    }

    /// Register a custom gate so it can be serialized and parsed back.
    ///
    /// The template supplies arity and matrix when a payload is decoded.
    #[must_use]
    pub fn register_custom(mut self, template: CustomGate, symbols: GateSymbols) -> Self {
        self.templates
            .insert(symbols.wire_name.clone(), template.clone());
        self.entries.insert(template.name, symbols);
        self
    }

    /// Symbols registered for a kind name.
    pub fn symbols(&self, kind: &str) -> Option<&GateSymbols> {
        self.entries.get(kind)
    }

    /// Wire name of an instruction's kind.
    pub fn wire_name(&self, instruction: &Instruction) -> IrResult<&str> {
        self.entries
            .get(instruction.name())
            .map(|s| s.wire_name.as_str())
            .ok_or_else(|| IrError::UnregisteredGate(instruction.name().to_string()))
    }

    /// Diagram labels for each connected qubit of an instruction.
    ///
    /// Controlled gates draw `*` on their controls and the kernel's labels
    /// on the remaining qubits. Unregistered kinds fall back to their name.
    pub fn display_symbols(&self, instruction: &Instruction) -> Vec<String> {
        if let InstructionKind::Gate(GateKind::Standard(StandardGate::Controlled {
            kernel,
            num_controls,
        })) = &instruction.kind
        {
            let mut labels = vec!["*".to_string(); *num_controls as usize];
            labels.extend(self.kind_labels(kernel.name(), kernel.num_qubits() as usize));
            return labels;
        }
        self.kind_labels(instruction.name(), instruction.qubits.len())
    }

    fn kind_labels(&self, kind: &str, arity: usize) -> Vec<String> {
        match self.entries.get(kind) {
            Some(symbols) if symbols.display.len() == arity => symbols.display.clone(),
            _ => vec![kind.to_string(); arity],
        }
    }

    /// Kind name registered under a wire name.
    pub fn kind_for_wire_name(&self, wire_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, s)| s.wire_name == wire_name)
            .map(|(kind, _)| kind.as_str())
    }

    /// Custom gate template registered under a wire name.
    pub fn custom_template(&self, wire_name: &str) -> Option<&CustomGate> {
        self.templates.get(wire_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::{BitId, QubitId};

    #[test]
    fn test_standard_registry_covers_readout() {
        let registry = SymbolRegistry::standard();
        let readout = Instruction::readout(QubitId(1), BitId(1));
        assert_eq!(registry.wire_name(&readout).unwrap(), "readout");
        assert_eq!(registry.display_symbols(&readout), vec!["M"]);
    }

    #[test]
    fn test_register_renames_wire_type() {
        let registry = SymbolRegistry::standard()
            .register("control_z", GateSymbols::new("cz", &["@", "@"]));
        let cz = Instruction::two(StandardGate::ControlZ, QubitId(1), QubitId(2));
        assert_eq!(registry.wire_name(&cz).unwrap(), "cz");
        assert_eq!(registry.display_symbols(&cz), vec!["@", "@"]);
        assert_eq!(registry.kind_for_wire_name("cz"), Some("control_z"));
    }

    #[test]
    fn test_unregistered_gate() {
        let registry = SymbolRegistry::empty();
        let h = Instruction::single(StandardGate::Hadamard, QubitId(1));
        assert!(matches!(
            registry.wire_name(&h),
            Err(IrError::UnregisteredGate(name)) if name == "hadamard"
        ));
        assert_eq!(registry.display_symbols(&h), vec!["hadamard"]);
    }

    #[test]
    fn test_controlled_display() {
        let registry = SymbolRegistry::standard();
        let kernel = Instruction::single(StandardGate::Hadamard, QubitId(2));
        let ch = Instruction::controlled(kernel, [QubitId(1)]).unwrap();
        assert_eq!(registry.display_symbols(&ch), vec!["*", "H"]);
        assert!(registry.wire_name(&ch).is_err());
    }

    #[test]
    fn test_custom_registration() {
        let oracle = CustomGate::new("oracle", 2);
        let registry = SymbolRegistry::standard()
            .register_custom(oracle.clone(), GateSymbols::new("orc", &["O", "O"]));
        assert_eq!(registry.custom_template("orc"), Some(&oracle));
        assert_eq!(registry.kind_for_wire_name("orc"), Some("oracle"));
    }
}
