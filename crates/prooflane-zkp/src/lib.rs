//! # prooflane-zkp: Proof Engine
//!
//! Everything that touches a proving system:
//!
//! - [`traits`]: the [`ProofBackend`] boundary and its error types.
//! - [`client`]: the timed, validating [`EngineClient`] over a backend.
//! - [`groth16`]: arkworks Groth16 over BN254, proving the [`circuit`].
//! - [`mock`]: a transparent SHA-256 backend (feature `mock`, on by default).
//! - [`ethereum`]: conversion of Groth16 artifacts into verifier calldata.
//! - [`codec`]: arkworks blob encodings shared by the above.
//!
//! ## Security Notice
//!
//! The `mock` backend provides no soundness. The Groth16 `setup` key source
//! derives keys from a public seed; production keys must come from a file
//! produced by a proper ceremony.

pub mod circuit;
pub mod client;
pub mod codec;
pub mod ethereum;
pub mod groth16;
#[cfg(feature = "mock")]
pub mod mock;
pub mod traits;

pub use client::{timed, EngineClient, Timed};
pub use ethereum::{
    to_verifier_inputs, to_verifier_proof, G1Point, G2Point, MalformedProofError, VerifierCalldata,
    VerifierInputs, VerifierProof,
};
pub use groth16::{generate_key_material, Groth16Backend, KeySource};
#[cfg(feature = "mock")]
pub use mock::MockBackend;
pub use traits::{InitializationError, ProofBackend, ProvingError, VerificationError};
