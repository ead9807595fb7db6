//! Kestrel Command-Line Interface
//!
//! The main entry point for the `kestrel` tool.
//!
//! ```text
//! kestrel transpile -i bell.json --device line:5 -o bell.native.json
//! kestrel compare bell.json bell.native.json
//! kestrel describe -i bell.json --device lattice:2x3
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compare, describe, transpile};

/// Kestrel - quantum circuit transpilation for restricted devices
#[derive(Parser)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile a circuit for a target device
    Transpile {
        /// Input circuit document (JSON)
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Target device, e.g. line:5, lattice:3x4, all-to-all:8
        #[arg(short, long, conflicts_with = "config")]
        device: Option<String>,

        /// Transpiler configuration file (JSON or YAML)
        #[arg(short, long, env = "KESTREL_CONFIG")]
        config: Option<String>,

        /// Emit a job payload with this many shots instead of a circuit document
        #[arg(long)]
        shots: Option<u64>,

        /// Check the result against the input
        #[arg(long)]
        verify: bool,
    },

    /// Check whether two circuits act identically up to global phase
    Compare {
        /// First circuit document
        first: String,

        /// Second circuit document
        second: String,

        /// Entrywise tolerance for the unitary comparison
        #[arg(short, long)]
        tolerance: Option<f64>,
    },

    /// Print a circuit diagram, a device map, or both
    Describe {
        /// Circuit document to draw
        #[arg(short, long)]
        input: Option<String>,

        /// Device to draw, e.g. line:5 or lattice:3x4
        #[arg(short, long, conflicts_with = "config")]
        device: Option<String>,

        /// Transpiler configuration whose device is drawn
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Transpile {
            input,
            output,
            device,
            config,
            shots,
            verify,
        } => transpile::execute(
            &input,
            output.as_deref(),
            device.as_deref(),
            config.as_deref(),
            shots,
            verify,
        ),

        Commands::Compare {
            first,
            second,
            tolerance,
        } => compare::execute(&first, &second, tolerance),

        Commands::Describe {
            input,
            device,
            config,
        } => describe::execute(input.as_deref(), device.as_deref(), config.as_deref()),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
