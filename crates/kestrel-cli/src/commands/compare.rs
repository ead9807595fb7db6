//! Compare command implementation.

use anyhow::Result;
use console::style;

use kestrel_ir::SymbolRegistry;
use kestrel_transpile::{EQUIVALENCE_TOLERANCE, compare_circuits_with_tolerance};

use super::common::load_circuit;

/// Execute the compare command.
pub fn execute(first: &str, second: &str, tolerance: Option<f64>) -> Result<()> {
    let registry = SymbolRegistry::standard();
    let a = load_circuit(first, &registry)?;
    let b = load_circuit(second, &registry)?;
    let tolerance = tolerance.unwrap_or(EQUIVALENCE_TOLERANCE);

    if compare_circuits_with_tolerance(&a, &b, tolerance)? {
        println!(
            "{} {} and {} are equivalent (tolerance {tolerance:e})",
            style("✓").green().bold(),
            style(first).green(),
            style(second).green()
        );
        Ok(())
    } else {
        anyhow::bail!("{first} and {second} are not equivalent (tolerance {tolerance:e})")
    }
}
