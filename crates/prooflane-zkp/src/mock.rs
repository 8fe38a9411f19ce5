//! # Mock Backend
//!
//! A deterministic, transparent backend for development and tests. The
//! "proof" is a SHA-256 commitment to the public-input blob, so anyone can
//! forge one. It provides NO soundness and NO zero-knowledge.
//!
//! Public inputs use the same encoding as the Groth16 backend, so tooling
//! that reads them works against either backend. Proofs are 32 bytes and
//! are rejected by the verifier-format converter.

use std::sync::atomic::{AtomicBool, Ordering};

use sha2::{Digest, Sha256};

use prooflane_core::{AssignedInputs, CircuitLayout, Proof, ProofArtifacts, PublicInputs};

use crate::codec::{self, to_scalar};
use crate::traits::{InitializationError, ProofBackend, ProvingError, VerificationError};

const DOMAIN: &[u8] = b"prooflane.mock.v1";

/// Length of a mock proof in bytes.
pub const MOCK_PROOF_LEN: usize = 32;

/// Transparent SHA-256 backend.
#[derive(Debug)]
pub struct MockBackend {
    layout: CircuitLayout,
    initialized: AtomicBool,
}

impl MockBackend {
    pub fn new(layout: CircuitLayout) -> Self {
        Self {
            layout,
            initialized: AtomicBool::new(false),
        }
    }

    fn commitment(public_inputs: &PublicInputs) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        hasher.update(public_inputs.as_bytes());
        hasher.finalize().to_vec()
    }
}

impl ProofBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn layout(&self) -> &CircuitLayout {
        &self.layout
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    fn initialize(&self) -> Result<(), InitializationError> {
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    fn prove(&self, inputs: &AssignedInputs) -> Result<ProofArtifacts, ProvingError> {
        if !self.is_initialized() {
            return Err(ProvingError::KeysUnavailable);
        }
        let public: Vec<_> = inputs.public_inputs().iter().map(to_scalar).collect();
        let public_inputs = codec::encode_public_inputs(&public)
            .map_err(|e| ProvingError::GenerationFailed(e.to_string()))?;
        let proof = Proof::new(Self::commitment(&public_inputs));
        Ok(ProofArtifacts::new(proof, public_inputs))
    }

    fn verify(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerificationError> {
        if !self.is_initialized() {
            return Err(VerificationError::KeysUnavailable);
        }
        if proof.len() != MOCK_PROOF_LEN {
            return Err(VerificationError::MalformedProof(format!(
                "expected {MOCK_PROOF_LEN} bytes, got {}",
                proof.len()
            )));
        }
        let inputs = codec::decode_public_inputs(public_inputs)
            .map_err(|e| VerificationError::MalformedInputs(e.to_string()))?;
        if inputs.len() != self.layout.public_input_count() {
            return Err(VerificationError::MalformedInputs(format!(
                "expected {} public inputs, got {}",
                self.layout.public_input_count(),
                inputs.len()
            )));
        }
        Ok(proof.as_bytes() == Self::commitment(public_inputs).as_slice())
    }
}
