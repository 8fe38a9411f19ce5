//! # Proof Engine Client
//!
//! Thin adapter over a [`ProofBackend`]. Adds three things the backend does
//! not do itself:
//!
//! - validation of named [`CircuitInputs`] against the backend layout,
//!   before the backend sees them;
//! - rejection of empty artifacts, so an empty proof is never stored;
//! - wall-clock timing and structured logging of every call.
//!
//! The client holds no state of its own beyond the backend.

use std::time::{Duration, Instant};

use prooflane_core::{CircuitInputs, CircuitLayout, Proof, ProofArtifacts, PublicInputs};

use crate::traits::{InitializationError, ProofBackend, ProvingError, VerificationError};

/// A value together with the wall-clock time it took to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Pair `value` with an already measured duration.
    pub fn new(value: T, elapsed: Duration) -> Self {
        Self { value, elapsed }
    }

    /// Transform the value, keeping the timing.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }

    /// Elapsed time in fractional seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Drop the timing.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Run `f`, timing it.
pub fn timed<T, E>(f: impl FnOnce() -> Result<T, E>) -> Result<Timed<T>, E> {
    let start = Instant::now();
    let value = f()?;
    Ok(Timed::new(value, start.elapsed()))
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Timed, validating front-end to a proof backend.
#[derive(Debug)]
pub struct EngineClient<B> {
    backend: B,
}

impl<B: ProofBackend> EngineClient<B> {
    /// Wrap `backend`. The backend is not initialized here.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Layout the backend is compiled for.
    pub fn layout(&self) -> &CircuitLayout {
        self.backend.layout()
    }

    /// Whether the backend has loaded its keys.
    pub fn is_initialized(&self) -> bool {
        self.backend.is_initialized()
    }

    /// One-time backend setup.
    pub fn initialize(&self) -> Result<Timed<()>, InitializationError> {
        let backend = self.backend.name();
        match timed(|| self.backend.initialize()) {
            Ok(done) => {
                tracing::info!(backend, elapsed_ms = millis(done.elapsed), "backend initialized");
                Ok(done)
            }
            Err(e) => {
                tracing::warn!(backend, error = %e, "backend initialization failed");
                Err(e)
            }
        }
    }

    /// Validate `inputs` against the layout, then generate a proof.
    ///
    /// # Errors
    ///
    /// [`ProvingError::InvalidInputs`] if the inputs do not fit the layout
    /// (the backend is not called), [`ProvingError::EmptyArtifact`] if the
    /// backend returned an empty blob, or whatever the backend reports.
    pub fn prove(&self, inputs: &CircuitInputs) -> Result<Timed<ProofArtifacts>, ProvingError> {
        let backend = self.backend.name();
        let assigned = self.layout().assign(inputs).map_err(|e| {
            tracing::warn!(backend, error = %e, "circuit inputs rejected");
            ProvingError::from(e)
        })?;

        let result = timed(|| {
            let artifacts = self.backend.prove(&assigned)?;
            if artifacts.proof.is_empty() {
                return Err(ProvingError::EmptyArtifact("proof"));
            }
            if artifacts.public_inputs.is_empty() {
                return Err(ProvingError::EmptyArtifact("public inputs"));
            }
            Ok(artifacts)
        });

        match &result {
            Ok(done) => tracing::info!(
                backend,
                elapsed_ms = millis(done.elapsed),
                proof_bytes = done.value.proof.len(),
                public_input_bytes = done.value.public_inputs.len(),
                "proof generated"
            ),
            Err(e) => tracing::warn!(backend, error = %e, "proof generation failed"),
        }
        result
    }

    /// Check a proof against its public inputs.
    pub fn verify(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<Timed<bool>, VerificationError> {
        let backend = self.backend.name();
        let result = timed(|| self.backend.verify(proof, public_inputs));
        match &result {
            Ok(done) => tracing::info!(
                backend,
                elapsed_ms = millis(done.elapsed),
                valid = done.value,
                "proof verified"
            ),
            Err(e) => tracing::warn!(backend, error = %e, "verification failed"),
        }
        result
    }
}
