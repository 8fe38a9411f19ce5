//! # Setup Command
//!
//! Runs the deterministic Groth16 setup for the configured layout and writes
//! the compressed proving key, for use with `keys: { source: file }`.
//!
//! The seed is public, so the resulting keys are for development only.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use prooflane_zkp::{generate_key_material, KeySource};

use crate::config::ClientConfig;

/// Arguments for `prooflane setup`.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Where to write the proving key.
    #[arg(long)]
    pub out: PathBuf,

    /// Setup seed. Defaults to the config's setup seed, or 0.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute `prooflane setup`.
pub fn run_setup(args: &SetupArgs, config: &ClientConfig) -> Result<u8> {
    let seed = args.seed.unwrap_or(match config.keys {
        KeySource::Setup { seed } => seed,
        KeySource::File { .. } => 0,
    });
    let layout = &config.circuit;

    let key = generate_key_material(layout, seed)
        .with_context(|| format!("setup failed for layout {}", layout.name()))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&args.out, &key)
        .with_context(|| format!("failed to write proving key: {}", args.out.display()))?;

    tracing::info!(
        layout = layout.name(),
        seed,
        bytes = key.len(),
        path = %args.out.display(),
        "proving key written"
    );
    println!(
        "Wrote proving key for {} ({} public inputs, {} bytes) to {}",
        layout.name(),
        layout.public_input_count(),
        key.len(),
        args.out.display()
    );
    Ok(0)
}
