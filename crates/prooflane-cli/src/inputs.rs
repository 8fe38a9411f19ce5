//! # Inputs Command
//!
//! Prints the built-in RSA-2048 input set as JSON, a starting point for
//! `prooflane run --inputs`.

use anyhow::Result;

use prooflane_core::CircuitInputs;

/// Execute `prooflane inputs`.
pub fn run_inputs() -> Result<u8> {
    println!(
        "{}",
        serde_json::to_string_pretty(&CircuitInputs::rsa_2048_example())?
    );
    Ok(0)
}
