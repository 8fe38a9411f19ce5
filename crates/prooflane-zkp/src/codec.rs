//! # Blob Codec
//!
//! arkworks compressed encodings shared by the backends and the verifier
//! converter. A decoded blob must be consumed exactly; trailing bytes are
//! an error.

use ark_bn254::{Bn254, Fr};
use ark_ff::PrimeField;
use ark_groth16::Proof as Groth16Proof;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use num_bigint::BigUint;
use thiserror::Error;

use prooflane_core::{Proof, PublicInputs};

/// Failure to decode an arkworks blob.
#[derive(Error, Debug)]
pub enum CodecError {
    /// arkworks rejected the encoding.
    #[error("{0}")]
    Serialization(#[from] SerializationError),
    /// Bytes were left after the value.
    #[error("{0} trailing bytes after encoded value")]
    TrailingBytes(usize),
}

/// Compressed encoding of any arkworks value.
pub fn encode<T: CanonicalSerialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::with_capacity(value.compressed_size());
    value.serialize_compressed(&mut bytes)?;
    Ok(bytes)
}

/// Decode a compressed value, requiring the whole slice to be consumed.
pub fn decode_exact<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut reader = bytes;
    let value = T::deserialize_compressed(&mut reader)?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes(reader.len()));
    }
    Ok(value)
}

/// Reduce a big integer into the scalar field.
pub fn to_scalar(value: &BigUint) -> Fr {
    Fr::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Decimal string of any prime-field element.
pub fn to_decimal<F: PrimeField>(value: &F) -> String {
    let value: BigUint = (*value).into();
    value.to_string()
}

/// Encode field elements as a [`PublicInputs`] blob.
pub fn encode_public_inputs(values: &[Fr]) -> Result<PublicInputs, SerializationError> {
    encode(&values.to_vec()).map(PublicInputs::new)
}

/// Decode a [`PublicInputs`] blob into field elements.
pub fn decode_public_inputs(blob: &PublicInputs) -> Result<Vec<Fr>, CodecError> {
    decode_exact(blob.as_bytes())
}

/// Encode a Groth16 proof as a [`Proof`] blob.
pub fn encode_proof(proof: &Groth16Proof<Bn254>) -> Result<Proof, SerializationError> {
    encode(proof).map(Proof::new)
}

/// Decode a [`Proof`] blob into a Groth16 proof.
pub fn decode_proof(blob: &Proof) -> Result<Groth16Proof<Bn254>, CodecError> {
    decode_exact(blob.as_bytes())
}
