//! # Groth16 Backend
//!
//! arkworks Groth16 over BN254 proving the [`LimbCircuit`] for one layout.
//!
//! ## Properties
//!
//! - **Proof size:** 128 bytes compressed (A, C in G1; B in G2).
//! - **Verification:** constant, three pairings against the prepared key.
//! - **Trusted setup:** circuit-specific. Keys either come from a file
//!   written by [`generate_key_material`] or are derived in-process from a
//!   seed (development only, the toxic waste is reproducible).
//!
//! ## Blob Encodings
//!
//! - `Proof`: compressed `ark_groth16::Proof<Bn254>`.
//! - `PublicInputs`: compressed `Vec<Fr>` (u64 length prefix, then 32-byte
//!   little-endian elements), in layout order with the binding digest last.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, ProvingKey};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use prooflane_core::{
    AssignedInputs, CircuitInputs, CircuitLayout, Proof, ProofArtifacts, PublicInputs,
};

use crate::circuit::LimbCircuit;
use crate::codec::{self, to_scalar};
use crate::traits::{InitializationError, ProofBackend, ProvingError, VerificationError};

/// Where the Groth16 backend gets its proving key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum KeySource {
    /// Compressed `ProvingKey<Bn254>` on disk.
    File {
        /// Path to the key file.
        path: PathBuf,
    },
    /// Deterministic in-process setup from a seed.
    Setup {
        /// RNG seed for the setup.
        seed: u64,
    },
}

impl Default for KeySource {
    fn default() -> Self {
        Self::Setup { seed: 0 }
    }
}

struct Groth16Keys {
    pk: ProvingKey<Bn254>,
    pvk: PreparedVerifyingKey<Bn254>,
}

/// Groth16/BN254 implementation of [`ProofBackend`].
pub struct Groth16Backend {
    layout: CircuitLayout,
    source: KeySource,
    keys: RwLock<Option<Arc<Groth16Keys>>>,
}

impl std::fmt::Debug for Groth16Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Groth16Backend")
            .field("layout", &self.layout.name())
            .field("source", &self.source)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl Groth16Backend {
    /// A backend for `layout` that loads keys from `source` on initialize.
    pub fn new(layout: CircuitLayout, source: KeySource) -> Self {
        Self {
            layout,
            source,
            keys: RwLock::new(None),
        }
    }

    /// The configured key source.
    pub fn key_source(&self) -> &KeySource {
        &self.source
    }

    fn keys(&self) -> Option<Arc<Groth16Keys>> {
        self.keys.read().clone()
    }

    fn load(&self) -> Result<ProvingKey<Bn254>, InitializationError> {
        match &self.source {
            KeySource::Setup { seed } => {
                tracing::debug!(layout = self.layout.name(), seed, "running circuit-specific setup");
                setup(&self.layout, *seed)
            }
            KeySource::File { path } => {
                tracing::debug!(path = %path.display(), "loading proving key");
                let bytes = std::fs::read(path).map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => {
                        InitializationError::KeyMaterialMissing(path.display().to_string())
                    }
                    _ => InitializationError::Backend(format!("{}: {e}", path.display())),
                })?;
                codec::decode_exact::<ProvingKey<Bn254>>(&bytes).map_err(|e| {
                    InitializationError::KeyMaterialCorrupt(format!("{}: {e}", path.display()))
                })
            }
        }
    }
}

fn setup(layout: &CircuitLayout, seed: u64) -> Result<ProvingKey<Bn254>, InitializationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (pk, _vk) = Groth16::<Bn254>::circuit_specific_setup(LimbCircuit::blank(layout), &mut rng)
        .map_err(|e| InitializationError::Backend(format!("setup failed: {e}")))?;
    Ok(pk)
}

/// Run the deterministic setup for `layout` and return the compressed
/// proving key, suitable for [`KeySource::File`].
pub fn generate_key_material(
    layout: &CircuitLayout,
    seed: u64,
) -> Result<Vec<u8>, InitializationError> {
    let pk = setup(layout, seed)?;
    codec::encode(&pk).map_err(|e| InitializationError::Backend(e.to_string()))
}

/// Reject a key whose variable counts differ from the layout's relation.
fn check_key_shape(
    layout: &CircuitLayout,
    pk: &ProvingKey<Bn254>,
) -> Result<(), InitializationError> {
    let shape = LimbCircuit::shape(layout)
        .map_err(|e| InitializationError::Backend(format!("circuit synthesis failed: {e}")))?;
    let checks = [
        ("instance variables", shape.instance_variables, pk.vk.gamma_abc_g1.len()),
        ("variables", shape.total_variables(), pk.a_query.len()),
    ];
    for (what, expected, actual) in checks {
        if expected != actual {
            return Err(InitializationError::LayoutMismatch(format!(
                "key has {actual} {what}, layout {:?} needs {expected}",
                layout.name()
            )));
        }
    }
    Ok(())
}

/// Prove and verify a fixed assignment with a loaded key.
///
/// Catches a key for a different relation that happens to have the same
/// variable counts as this layout's.
fn check_known_answer(
    layout: &CircuitLayout,
    pk: &ProvingKey<Bn254>,
    pvk: &PreparedVerifyingKey<Bn254>,
) -> Result<(), InitializationError> {
    let mut next = 0u64;
    let mut builder = CircuitInputs::builder();
    for signal in layout.signals() {
        let limbs: Vec<u64> = (0..signal.arity)
            .map(|_| {
                next += 1;
                next
            })
            .collect();
        builder = builder.signal_u64(signal.name.clone(), limbs);
    }
    let assigned = layout
        .assign(&builder.build())
        .map_err(|e| InitializationError::Backend(format!("known-answer inputs: {e}")))?;
    let public: Vec<Fr> = assigned.public_inputs().iter().map(to_scalar).collect();

    let circuit = LimbCircuit::assigned(&assigned);
    let proof = Groth16::<Bn254>::prove(pk, circuit, &mut rand::thread_rng())
        .map_err(|e| InitializationError::Backend(format!("known-answer proof failed: {e}")))?;
    let valid = Groth16::<Bn254>::verify_with_processed_vk(pvk, &public, &proof)
        .map_err(|e| InitializationError::Backend(format!("known-answer verify failed: {e}")))?;
    if !valid {
        return Err(InitializationError::LayoutMismatch(format!(
            "key does not prove the relation of layout {:?}",
            layout.name()
        )));
    }
    Ok(())
}

impl ProofBackend for Groth16Backend {
    fn name(&self) -> &'static str {
        "groth16"
    }

    fn layout(&self) -> &CircuitLayout {
        &self.layout
    }

    fn is_initialized(&self) -> bool {
        self.keys.read().is_some()
    }

    fn initialize(&self) -> Result<(), InitializationError> {
        if self.is_initialized() {
            return Ok(());
        }

        let pk = self.load()?;
        check_key_shape(&self.layout, &pk)?;
        let pvk = Groth16::<Bn254>::process_vk(&pk.vk)
            .map_err(|e| InitializationError::Backend(format!("key preparation failed: {e}")))?;
        if matches!(self.source, KeySource::File { .. }) {
            check_known_answer(&self.layout, &pk, &pvk)?;
        }

        *self.keys.write() = Some(Arc::new(Groth16Keys { pk, pvk }));
        Ok(())
    }

    fn prove(&self, inputs: &AssignedInputs) -> Result<ProofArtifacts, ProvingError> {
        let keys = self.keys().ok_or(ProvingError::KeysUnavailable)?;

        if inputs.limbs().len() != self.layout.total_limbs() {
            return Err(ProvingError::GenerationFailed(format!(
                "expected {} limbs, got {}",
                self.layout.total_limbs(),
                inputs.limbs().len()
            )));
        }
        let public: Vec<Fr> = inputs.public_inputs().iter().map(to_scalar).collect();
        if public.len() != self.layout.public_input_count() {
            return Err(ProvingError::GenerationFailed(format!(
                "expected {} public inputs, got {}",
                self.layout.public_input_count(),
                public.len()
            )));
        }

        let proof = Groth16::<Bn254>::prove(
            &keys.pk,
            LimbCircuit::assigned(inputs),
            &mut rand::thread_rng(),
        )
        .map_err(|e| ProvingError::GenerationFailed(e.to_string()))?;

        let proof =
            codec::encode_proof(&proof).map_err(|e| ProvingError::GenerationFailed(e.to_string()))?;
        let public_inputs = codec::encode_public_inputs(&public)
            .map_err(|e| ProvingError::GenerationFailed(e.to_string()))?;
        Ok(ProofArtifacts::new(proof, public_inputs))
    }

    fn verify(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerificationError> {
        let keys = self.keys().ok_or(VerificationError::KeysUnavailable)?;

        let proof = codec::decode_proof(proof)
            .map_err(|e| VerificationError::MalformedProof(e.to_string()))?;
        let inputs = codec::decode_public_inputs(public_inputs)
            .map_err(|e| VerificationError::MalformedInputs(e.to_string()))?;
        if inputs.len() != self.layout.public_input_count() {
            return Err(VerificationError::MalformedInputs(format!(
                "expected {} public inputs, got {}",
                self.layout.public_input_count(),
                inputs.len()
            )));
        }

        Groth16::<Bn254>::verify_with_processed_vk(&keys.pvk, &inputs, &proof)
            .map_err(|e| VerificationError::Backend(e.to_string()))
    }
}
