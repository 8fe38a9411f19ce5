//! # Scalar Field Helpers
//!
//! Decimal parsing and the limb-binding digest over the BN254 scalar field.
//! Both backends and the Groth16 circuit derive the trailing public input
//! from [`binding_digest`], so the host-side value here must agree with the
//! in-circuit Horner chain limb for limb.

use std::sync::OnceLock;

use num_bigint::BigUint;

/// Decimal form of the BN254 scalar field modulus `r`.
pub const BN254_SCALAR_MODULUS: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Horner base used by the limb-binding digest.
pub const DIGEST_BASE: u64 = 0x9e37_79b9_7f4a_7c15;

/// The BN254 scalar field modulus as a big integer.
pub fn scalar_modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| {
        BigUint::parse_bytes(BN254_SCALAR_MODULUS.as_bytes(), 10)
            .expect("BN254_SCALAR_MODULUS is a decimal literal")
    })
}

/// Parse a strict decimal string (ASCII digits only, no sign, no separators).
pub fn parse_decimal(value: &str) -> Option<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(value.as_bytes(), 10)
}

/// Whether `value` is a canonical scalar field element.
pub fn fits_scalar_field(value: &BigUint) -> bool {
    value < scalar_modulus()
}

/// Horner digest `acc' = acc * DIGEST_BASE + limb (mod r)` over `limbs`.
pub fn binding_digest<'a, I>(limbs: I) -> BigUint
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let modulus = scalar_modulus();
    let base = BigUint::from(DIGEST_BASE);
    limbs
        .into_iter()
        .fold(BigUint::default(), |acc, limb| (acc * &base + limb) % modulus)
}
