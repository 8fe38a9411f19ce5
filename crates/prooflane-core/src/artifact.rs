//! # Proof Artifacts
//!
//! Opaque, backend-defined byte blobs produced by a successful prove call.
//! The core never looks inside them; only the backend that produced them
//! and the verifier-format converter know their encoding.
//!
//! Blobs are immutable once built. Serialized as lowercase hex.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! blob {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(#[serde(with = "hex")] Vec<u8>);

        impl $name {
            /// Wrap raw backend bytes.
            pub fn new(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Length in bytes.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Whether the blob is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Lowercase hex encoding.
            pub fn to_hex(&self) -> String {
                hex::encode(&self.0)
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({} bytes)"), self.0.len())
            }
        }
    };
}

blob!(
    /// An opaque proof produced by a backend.
    Proof
);

blob!(
    /// The public inputs paired with a [`Proof`].
    PublicInputs
);

/// A proof and its public inputs, created together and never split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifacts {
    /// The proof blob.
    pub proof: Proof,
    /// Public inputs the proof attests to.
    pub public_inputs: PublicInputs,
}

impl ProofArtifacts {
    /// Pair a proof with its public inputs.
    pub fn new(proof: Proof, public_inputs: PublicInputs) -> Self {
        Self {
            proof,
            public_inputs,
        }
    }
}
