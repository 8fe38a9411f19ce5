//! # Run Command
//!
//! Drives one full lifecycle: initialize, prove, verify, then convert the
//! stored pair into verifier calldata. Prints a timing line per stage, or a
//! single JSON document with `--json`.
//!
//! ```bash
//! prooflane run
//! prooflane run --inputs inputs.json --json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use prooflane_core::{CircuitInputs, ProofArtifacts};
use prooflane_state::{LifecycleError, LifecycleState, ProofLifecycle};
use prooflane_zkp::{ProofBackend, VerifierCalldata};

use crate::config::ClientConfig;

/// Arguments for `prooflane run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON file with circuit inputs (signal name -> decimal strings).
    /// Defaults to the built-in RSA-2048 input set.
    #[arg(long)]
    pub inputs: Option<PathBuf>,

    /// Print one JSON document instead of progress lines.
    #[arg(long)]
    pub json: bool,
}

/// Everything a run produced.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub backend: &'static str,
    pub layout: String,
    pub state: LifecycleState,
    pub initialize_secs: f64,
    pub prove_secs: f64,
    pub verify_secs: f64,
    pub valid: bool,
    pub artifacts: ProofArtifacts,
    /// Absent when the backend's proofs have no verifier encoding.
    pub calldata: Option<VerifierCalldata>,
}

/// Read circuit inputs from a JSON file.
pub fn load_inputs(path: &Path) -> Result<CircuitInputs> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read inputs: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse inputs: {}", path.display()))
}

/// Run the lifecycle once against `backend`, echoing progress unless quiet.
pub fn execute<B: ProofBackend>(
    backend: B,
    inputs: &CircuitInputs,
    quiet: bool,
) -> Result<RunReport> {
    let lifecycle = ProofLifecycle::new(backend);
    let backend_name = lifecycle.client().backend().name();
    let say = |line: String| {
        if !quiet {
            println!("{line}");
        }
    };

    let initialize = lifecycle
        .initialize()
        .context("failed to initialize proof engine")?;
    say(format!("Initializing... {:.3}s", initialize.as_secs_f64()));

    let proved = lifecycle.prove(inputs).context("failed to generate proof")?;
    say(format!("Generating proof... {:.3}s", proved.elapsed_secs()));

    let verified = lifecycle.verify().context("failed to verify proof")?;
    say(format!("Verifying proof... {:.3}s", verified.elapsed_secs()));
    say(format!("Proof is valid: {}", verified.value));

    let calldata = match lifecycle.verifier_format() {
        Ok(calldata) => Some(calldata),
        Err(LifecycleError::MalformedProof(e)) => {
            tracing::warn!(backend = backend_name, error = %e, "no verifier format for this proof");
            None
        }
        Err(e) => return Err(e).context("failed to convert proof"),
    };

    Ok(RunReport {
        backend: backend_name,
        layout: lifecycle.layout().name().to_string(),
        state: lifecycle.state(),
        initialize_secs: initialize.as_secs_f64(),
        prove_secs: proved.elapsed_secs(),
        verify_secs: verified.elapsed_secs(),
        valid: verified.value,
        artifacts: proved.value.as_ref().clone(),
        calldata,
    })
}

/// Execute `prooflane run`.
pub fn run_run(args: &RunArgs, config: &ClientConfig) -> Result<u8> {
    let inputs = match &args.inputs {
        Some(path) => load_inputs(path)?,
        None => CircuitInputs::rsa_2048_example(),
    };

    let report = execute(config.backend(), &inputs, args.json)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.calldata {
            Some(calldata) => {
                println!("Verifier proof:");
                println!("{}", serde_json::to_string_pretty(&calldata.proof)?);
                println!("Verifier inputs ({}):", calldata.inputs.len());
                println!("{}", serde_json::to_string_pretty(&calldata.inputs)?);
            }
            None => println!("Verifier format: unavailable for the {} backend", report.backend),
        }
    }

    Ok(if report.valid { 0 } else { 1 })
}
