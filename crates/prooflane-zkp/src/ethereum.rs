//! # Verifier-Format Converter
//!
//! Converts Groth16/BN254 proof artifacts into the fixed-schema structure an
//! on-chain verifier contract consumes: every group element decomposed into
//! base-field coordinates, every value a decimal string.
//!
//! ## Coordinate Convention
//!
//! Follows the EIP-197 precompile and the snarkjs-generated Solidity
//! verifier:
//!
//! ```text
//! a = [x, y]
//! b = [[x.c1, x.c0], [y.c1, y.c0]]     imaginary coefficient first
//! c = [x, y]
//! ```
//!
//! The point at infinity encodes as `(0, 0)`.
//!
//! Conversion is pure and deterministic. It knows nothing about the lifecycle
//! and never looks at whether the proof verified.

use ark_bn254::{G1Affine, G2Affine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prooflane_core::{Proof, ProofArtifacts, PublicInputs};

use crate::codec::{self, to_decimal};

/// A blob could not be interpreted as Groth16/BN254 data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedProofError {
    #[error("proof is not a Groth16/BN254 proof: {0}")]
    Proof(String),
    #[error("public inputs are not BN254 scalars: {0}")]
    PublicInputs(String),
}

/// A G1 point as decimal coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Point {
    pub x: String,
    pub y: String,
}

/// A G2 point as decimal coordinates, each `[c1, c0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Point {
    pub x: [String; 2],
    pub y: [String; 2],
}

/// Groth16 proof in verifier-contract form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierProof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

impl VerifierProof {
    /// The eight calldata words in contract argument order.
    pub fn calldata(&self) -> [String; 8] {
        [
            self.a.x.clone(),
            self.a.y.clone(),
            self.b.x[0].clone(),
            self.b.x[1].clone(),
            self.b.y[0].clone(),
            self.b.y[1].clone(),
            self.c.x.clone(),
            self.c.y.clone(),
        ]
    }
}

/// Public inputs in verifier-contract form, one decimal string per slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifierInputs(Vec<String>);

impl VerifierInputs {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a VerifierInputs {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn g1(point: &G1Affine) -> G1Point {
    if point.infinity {
        return G1Point {
            x: "0".into(),
            y: "0".into(),
        };
    }
    G1Point {
        x: to_decimal(&point.x),
        y: to_decimal(&point.y),
    }
}

fn g2(point: &G2Affine) -> G2Point {
    if point.infinity {
        return G2Point {
            x: ["0".into(), "0".into()],
            y: ["0".into(), "0".into()],
        };
    }
    G2Point {
        x: [to_decimal(&point.x.c1), to_decimal(&point.x.c0)],
        y: [to_decimal(&point.y.c1), to_decimal(&point.y.c0)],
    }
}

/// Decompose a Groth16 proof blob into verifier coordinates.
///
/// # Errors
///
/// [`MalformedProofError::Proof`] if the blob is not a compressed
/// `ark_groth16::Proof<Bn254>`.
pub fn to_verifier_proof(proof: &Proof) -> Result<VerifierProof, MalformedProofError> {
    let proof = codec::decode_proof(proof).map_err(|e| MalformedProofError::Proof(e.to_string()))?;
    Ok(VerifierProof {
        a: g1(&proof.a),
        b: g2(&proof.b),
        c: g1(&proof.c),
    })
}

/// Render each public input as a decimal string, preserving order.
///
/// # Errors
///
/// [`MalformedProofError::PublicInputs`] if the blob is not a compressed
/// `Vec<Fr>`.
pub fn to_verifier_inputs(inputs: &PublicInputs) -> Result<VerifierInputs, MalformedProofError> {
    let values = codec::decode_public_inputs(inputs)
        .map_err(|e| MalformedProofError::PublicInputs(e.to_string()))?;
    Ok(VerifierInputs(values.iter().map(to_decimal).collect()))
}

/// A converted proof together with its inputs, ready for a verifier call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierCalldata {
    pub proof: VerifierProof,
    pub inputs: VerifierInputs,
}

impl VerifierCalldata {
    /// Convert both halves of a stored pair.
    pub fn from_artifacts(artifacts: &ProofArtifacts) -> Result<Self, MalformedProofError> {
        Ok(Self {
            proof: to_verifier_proof(&artifacts.proof)?,
            inputs: to_verifier_inputs(&artifacts.public_inputs)?,
        })
    }
}
