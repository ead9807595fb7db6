//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use kestrel_ir::{CircuitDocument, QuantumCircuit, SymbolRegistry};
use kestrel_transpile::{Connectivity, TranspilerConfig};

/// Load a circuit from a JSON circuit document.
pub fn load_circuit(path: &str, registry: &SymbolRegistry) -> Result<QuantumCircuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let document = CircuitDocument::from_json(&source)
        .with_context(|| format!("Failed to parse circuit document: {path}"))?;
    document
        .to_circuit(registry)
        .with_context(|| format!("Invalid circuit in {path}"))
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Parse a device shorthand: `line:N`, `lattice:RxC` or `all-to-all:N`.
pub fn parse_device(device: &str) -> Result<Connectivity> {
    let (kind, size) = device
        .split_once(':')
        .with_context(|| format!("Device '{device}' must look like line:5 or lattice:3x4"))?;
    let count = |text: &str| -> Result<u32> {
        let n: u32 = text
            .trim()
            .parse()
            .with_context(|| format!("Invalid qubit count '{text}' in device '{device}'"))?;
        if n == 0 {
            anyhow::bail!("Device '{device}' has no qubits");
        }
        Ok(n)
    };

    match kind.to_lowercase().as_str() {
        "line" => Ok(Connectivity::line(count(size)?)),
        "all-to-all" | "full" => Ok(Connectivity::all_to_all(count(size)?)),
        "lattice" | "grid" => {
            let (rows, cols) = size
                .split_once('x')
                .with_context(|| format!("Lattice '{device}' must give ROWSxCOLS"))?;
            Ok(Connectivity::lattice(count(rows)?, count(cols)?))
        }
        other => {
            anyhow::bail!("Unknown device kind: '{other}'. Available: line, lattice, all-to-all");
        }
    }
}

/// Resolve the transpiler configuration from `--device` or `--config`.
pub fn load_config(device: Option<&str>, config: Option<&str>) -> Result<TranspilerConfig> {
    match (device, config) {
        (Some(device), _) => Ok(TranspilerConfig::for_device(&parse_device(device)?)),
        (None, Some(path)) => TranspilerConfig::from_path(path)
            .with_context(|| format!("Failed to load configuration: {path}")),
        (None, None) => anyhow::bail!("Either --device or --config is required"),
    }
}
