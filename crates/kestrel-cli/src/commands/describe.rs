//! Describe command implementation.

use anyhow::Result;
use console::style;

use kestrel_ir::SymbolRegistry;

use super::common::{load_circuit, load_config};

/// Execute the describe command.
pub fn execute(input: Option<&str>, device: Option<&str>, config: Option<&str>) -> Result<()> {
    if input.is_none() && device.is_none() && config.is_none() {
        anyhow::bail!("Nothing to describe: give --input, --device or --config");
    }

    if let Some(path) = input {
        let circuit = load_circuit(path, &SymbolRegistry::standard())?;
        println!(
            "{} {}",
            style("Circuit").cyan().bold(),
            style(circuit.name().unwrap_or(path)).green()
        );
        println!(
            "  {} qubits, {} bits, {} instructions, depth {}",
            circuit.qubit_count(),
            circuit.bit_count(),
            circuit.num_instructions(),
            circuit.depth()
        );
        println!();
        println!("{circuit}");
    }

    if device.is_some() || config.is_some() {
        let config = load_config(device, config)?;
        let connectivity = config.connectivity()?;
        if input.is_some() {
            println!();
        }
        println!(
            "{} {}",
            style("Device").cyan().bold(),
            style(connectivity.label()).yellow()
        );
        println!("{connectivity}");
        println!();
        println!("  Native gates: {}", config.native_gate_set().gates().join(", "));
    }

    Ok(())
}
