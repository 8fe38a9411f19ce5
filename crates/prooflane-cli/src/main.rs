//! # prooflane CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, loads the
//! config file and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use prooflane_cli::config::ClientConfig;
use prooflane_cli::inputs::run_inputs;
use prooflane_cli::run::{run_run, RunArgs};
use prooflane_cli::setup::{run_setup, SetupArgs};

/// prooflane: zero-knowledge proof client
///
/// Initializes a proving backend, proves a circuit input set, verifies the
/// proof and converts it into on-chain verifier calldata.
#[derive(Parser, Debug)]
#[command(name = "prooflane", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize, prove, verify and convert in one pass.
    Run(RunArgs),

    /// Generate a Groth16 proving key file for the configured layout.
    Setup(SetupArgs),

    /// Print the built-in RSA-2048 circuit inputs as JSON.
    Inputs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "prooflane CLI starting");

    let result = ClientConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Run(args) => run_run(&args, &config),
        Commands::Setup(args) => run_setup(&args, &config),
        Commands::Inputs => run_inputs(),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
