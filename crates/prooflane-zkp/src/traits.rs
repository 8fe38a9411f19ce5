//! # Proof Backend Trait
//!
//! The boundary to the proving engine. A backend owns its key material and
//! exposes one-time setup, proof generation and verification; everything
//! else (ordering, storage of the latest proof, timing) lives above it.
//!
//! The trait requires `Send + Sync` so that a controller owning a backend
//! can be shared across threads.
//!
//! Backends define their own blob encodings. Errors are opaque beyond the
//! variant and a human-readable message.

use thiserror::Error;

use prooflane_core::{AssignedInputs, CircuitLayout, InputError, Proof, ProofArtifacts, PublicInputs};

/// Error during backend setup.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Key material could not be found.
    #[error("key material not found: {0}")]
    KeyMaterialMissing(String),
    /// Key material exists but could not be decoded.
    #[error("key material is corrupt: {0}")]
    KeyMaterialCorrupt(String),
    /// Key material was built for a different circuit layout.
    #[error("key material does not match circuit layout: {0}")]
    LayoutMismatch(String),
    /// Any other setup failure.
    #[error("backend setup failed: {0}")]
    Backend(String),
}

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProvingError {
    /// The inputs do not fit the backend's circuit layout.
    #[error("invalid circuit inputs: {0}")]
    InvalidInputs(#[from] InputError),
    /// The backend has not loaded its proving key.
    #[error("proving key is not loaded")]
    KeysUnavailable,
    /// Proof generation failed internally.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
    /// The backend returned an empty artifact.
    #[error("backend returned an empty {0}")]
    EmptyArtifact(&'static str),
}

/// Error during proof verification.
///
/// A proof that checks out as invalid is `Ok(false)`, not an error.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The backend has not loaded its verifying key.
    #[error("verifying key is not loaded")]
    KeysUnavailable,
    /// The proof blob could not be decoded.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The public-input blob could not be decoded.
    #[error("malformed public inputs: {0}")]
    MalformedInputs(String),
    /// The verification routine itself failed.
    #[error("verification failed: {0}")]
    Backend(String),
}

/// A proving engine compiled for one circuit layout.
pub trait ProofBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// The layout this backend proves.
    fn layout(&self) -> &CircuitLayout;

    /// Whether [`initialize`](Self::initialize) has succeeded.
    fn is_initialized(&self) -> bool;

    /// One-time setup. Calling it again after success is a no-op for the
    /// shipped backends.
    ///
    /// # Errors
    ///
    /// Returns [`InitializationError`] when key material is missing, corrupt,
    /// or built for another layout.
    fn initialize(&self) -> Result<(), InitializationError>;

    /// Generate a proof for inputs already assigned against
    /// [`layout`](Self::layout).
    ///
    /// Proofs are not guaranteed to be reproducible.
    fn prove(&self, inputs: &AssignedInputs) -> Result<ProofArtifacts, ProvingError>;

    /// Check `proof` against `public_inputs`. Pure: no backend state changes.
    fn verify(&self, proof: &Proof, public_inputs: &PublicInputs)
        -> Result<bool, VerificationError>;
}

impl<B: ProofBackend + ?Sized> ProofBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn layout(&self) -> &CircuitLayout {
        (**self).layout()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn initialize(&self) -> Result<(), InitializationError> {
        (**self).initialize()
    }

    fn prove(&self, inputs: &AssignedInputs) -> Result<ProofArtifacts, ProvingError> {
        (**self).prove(inputs)
    }

    fn verify(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerificationError> {
        (**self).verify(proof, public_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_convert_into_proving_errors() {
        let err: ProvingError = InputError::MissingSignal("modulus".into()).into();
        assert!(matches!(err, ProvingError::InvalidInputs(_)));
        assert_eq!(
            err.to_string(),
            "invalid circuit inputs: missing signal \"modulus\""
        );
    }

    #[test]
    fn messages_keep_backend_diagnostics() {
        let err = InitializationError::KeyMaterialCorrupt("unexpected end of file".into());
        assert!(err.to_string().contains("unexpected end of file"));
        let err = VerificationError::Backend("pairing failed".into());
        assert!(err.to_string().contains("pairing failed"));
        assert_eq!(
            ProvingError::EmptyArtifact("proof").to_string(),
            "backend returned an empty proof"
        );
    }
}
