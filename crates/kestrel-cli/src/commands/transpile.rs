//! Transpile command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use kestrel_ir::{CircuitDocument, JobPayload, SymbolRegistry};
use kestrel_transpile::{PipelineBuilder, Transpiler, compare_circuits};

use super::common::{load_circuit, load_config, write_output};

/// Execute the transpile command.
pub fn execute(
    input: &str,
    output: Option<&str>,
    device: Option<&str>,
    config: Option<&str>,
    shots: Option<u64>,
    verify: bool,
) -> Result<()> {
    let registry = SymbolRegistry::standard();
    let circuit = load_circuit(input, &registry)?;
    let config = load_config(device, config)?;
    let connectivity = config.connectivity()?;

    eprintln!(
        "{} Transpiling {} for {}",
        style("→").cyan().bold(),
        style(input).green(),
        style(connectivity.label()).yellow()
    );
    eprintln!(
        "  Loaded: {} qubits, {} instructions, depth {}",
        circuit.qubit_count(),
        circuit.num_instructions(),
        circuit.depth()
    );

    let pipeline = PipelineBuilder::from_config(&config)?.build();
    eprintln!("  Running {} passes", pipeline.len());
    debug!("Passes: {}", pipeline.names().join(", "));
    let transpiled = pipeline
        .transpile(&circuit)
        .with_context(|| format!("Failed to transpile {input}"))?;

    eprintln!("{} Transpilation complete", style("✓").green().bold());
    eprintln!(
        "  Result: {} qubits, {} instructions, depth {}",
        transpiled.qubit_count(),
        transpiled.num_instructions(),
        transpiled.depth()
    );

    if verify {
        if !config.restore_layout {
            anyhow::bail!("--verify needs restore_layout, the routed qubits are permuted otherwise");
        }
        if !compare_circuits(&circuit, &transpiled).context("Verification failed")? {
            anyhow::bail!("Transpiled circuit is not equivalent to {input}");
        }
        eprintln!("{} Verified equivalent up to global phase", style("✓").green().bold());
    }

    let content = match shots {
        Some(shots) => JobPayload::new(&transpiled, shots, &registry)?.to_json()?,
        None => CircuitDocument::from_circuit(&transpiled, &registry)?.to_json()?,
    };
    write_output(output, &content)?;
    if let Some(path) = output {
        eprintln!("  Output: {}", style(path).green());
    }

    Ok(())
}
