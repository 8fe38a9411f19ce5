//! # prooflane-core: Foundational Types
//!
//! Data shared by every lifecycle stage: the circuit layout a backend is
//! compiled for, the named circuit inputs a caller assembles, and the
//! opaque proof artifacts that travel from prover to verifier.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `prooflane-*` crates (leaf of the DAG).
//! - No proving-system types: blobs are opaque here.
//! - No `unsafe`, no `.unwrap()` outside tests.

pub mod artifact;
pub mod error;
pub mod field;
pub mod inputs;
pub mod layout;

pub use artifact::{Proof, ProofArtifacts, PublicInputs};
pub use error::{InputError, LayoutError};
pub use field::{binding_digest, scalar_modulus, BN254_SCALAR_MODULUS, DIGEST_BASE};
pub use inputs::{CircuitInputBuilder, CircuitInputs};
pub use layout::{AssignedInputs, CircuitLayout, Limb, SignalSpec, Visibility, RSA_2048_LIMBS};
