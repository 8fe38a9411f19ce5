//! # prooflane-cli: Command-Line Driver
//!
//! Provides the `prooflane` binary. The CLI is only a caller of the
//! lifecycle controller; it adds config loading, key setup and output
//! formatting.
//!
//! ## Subcommands
//!
//! - `prooflane run`: initialize, prove, verify and convert, with timings.
//! - `prooflane setup`: generate a Groth16 proving key file.
//! - `prooflane inputs`: print the built-in RSA-2048 input set.
//!
//! ```bash
//! prooflane setup --out keys/rsa.pk --seed 7
//! prooflane --config prooflane.yaml run --json
//! ```

pub mod config;
pub mod inputs;
pub mod run;
pub mod setup;
