//! # Circuit Layout
//!
//! The signal table a backend is compiled for: every signal's name, its
//! fixed arity (number of limbs), and whether its limbs are disclosed as
//! public inputs.
//!
//! A `CircuitLayout` can only be constructed valid. Deserialization goes
//! through the same checks as [`CircuitLayout::new`], so a layout read from a
//! config file is rejected before any backend sees it.
//!
//! ## Public input order
//!
//! ```text
//! [ public limbs in declaration order ... , binding digest ]
//! ```
//!
//! The declared public-input count is therefore `public limbs + 1`.

use std::collections::HashSet;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, LayoutError};
use crate::field::{binding_digest, fits_scalar_field, parse_decimal};
use crate::inputs::CircuitInputs;

/// Whether a signal's limbs are disclosed to the verifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Limbs become public inputs checked during verification.
    Public,
    /// Limbs stay in the witness.
    #[default]
    Private,
}

/// One declared signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpec {
    /// Logical signal name, e.g. `"modulus"`.
    pub name: String,
    /// Number of limbs the circuit expects.
    pub arity: usize,
    /// Disclosure of the limbs.
    #[serde(default)]
    pub visibility: Visibility,
}

impl SignalSpec {
    /// A private signal.
    pub fn private(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            visibility: Visibility::Private,
        }
    }

    /// A public signal.
    pub fn public(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            visibility: Visibility::Public,
        }
    }
}

/// A validated circuit signal table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutDef")]
pub struct CircuitLayout {
    name: String,
    signals: Vec<SignalSpec>,
}

#[derive(Deserialize)]
struct LayoutDef {
    name: String,
    signals: Vec<SignalSpec>,
}

impl TryFrom<LayoutDef> for CircuitLayout {
    type Error = LayoutError;

    fn try_from(def: LayoutDef) -> Result<Self, Self::Error> {
        CircuitLayout::new(def.name, def.signals)
    }
}

/// Limb width of the RSA-2048 layout.
pub const RSA_2048_LIMBS: usize = 32;

impl CircuitLayout {
    /// Build a layout, rejecting empty tables, empty names, duplicate names
    /// and zero-arity signals.
    pub fn new(name: impl Into<String>, signals: Vec<SignalSpec>) -> Result<Self, LayoutError> {
        let name = name.into();
        if signals.is_empty() {
            return Err(LayoutError::Empty(name));
        }
        let mut seen = HashSet::new();
        for spec in &signals {
            if spec.name.is_empty() {
                return Err(LayoutError::EmptySignalName);
            }
            if spec.arity == 0 {
                return Err(LayoutError::ZeroArity(spec.name.clone()));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(LayoutError::DuplicateSignal(spec.name.clone()));
            }
        }
        Ok(Self { name, signals })
    }

    /// RSA-2048 signature check shape: 32 x 64-bit limbs each for the
    /// signature, the modulus and the padded base message. Only the modulus
    /// is public.
    pub fn rsa_2048() -> Self {
        Self {
            name: "rsa-2048".to_string(),
            signals: vec![
                SignalSpec::private("signature", RSA_2048_LIMBS),
                SignalSpec::public("modulus", RSA_2048_LIMBS),
                SignalSpec::private("base_message", RSA_2048_LIMBS),
            ],
        }
    }

    /// Layout name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signals in order.
    pub fn signals(&self) -> &[SignalSpec] {
        &self.signals
    }

    /// Look up a signal by name.
    pub fn signal(&self, name: &str) -> Option<&SignalSpec> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Total number of limbs across all signals.
    pub fn total_limbs(&self) -> usize {
        self.signals.iter().map(|s| s.arity).sum()
    }

    /// Number of limbs disclosed as public inputs.
    pub fn public_limb_count(&self) -> usize {
        self.signals
            .iter()
            .filter(|s| s.visibility == Visibility::Public)
            .map(|s| s.arity)
            .sum()
    }

    /// Declared public-input count: public limbs plus the binding digest.
    pub fn public_input_count(&self) -> usize {
        self.public_limb_count() + 1
    }

    /// Check `inputs` against this layout and parse every value.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, checking unknown signals
    /// first and then each declared signal in order.
    pub fn assign(&self, inputs: &CircuitInputs) -> Result<AssignedInputs, InputError> {
        if let Some(unknown) = inputs.signal_names().find(|n| self.signal(n).is_none()) {
            return Err(InputError::UnknownSignal(unknown.to_string()));
        }

        let mut limbs = Vec::with_capacity(self.total_limbs());
        for spec in &self.signals {
            let values = inputs
                .get(&spec.name)
                .ok_or_else(|| InputError::MissingSignal(spec.name.clone()))?;
            if values.len() != spec.arity {
                return Err(InputError::ArityMismatch {
                    signal: spec.name.clone(),
                    expected: spec.arity,
                    actual: values.len(),
                });
            }
            for (index, text) in values.iter().enumerate() {
                let value = parse_decimal(text).ok_or_else(|| InputError::NotDecimal {
                    signal: spec.name.clone(),
                    index,
                    value: text.clone(),
                })?;
                if !fits_scalar_field(&value) {
                    return Err(InputError::OutOfField {
                        signal: spec.name.clone(),
                        index,
                    });
                }
                limbs.push(Limb {
                    visibility: spec.visibility,
                    value,
                });
            }
        }

        let digest = binding_digest(limbs.iter().map(|l| &l.value));
        Ok(AssignedInputs { limbs, digest })
    }
}

/// A parsed limb in layout order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limb {
    /// Visibility inherited from the signal.
    pub visibility: Visibility,
    /// Canonical field value.
    pub value: BigUint,
}

/// Inputs that passed layout validation, ready for a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedInputs {
    limbs: Vec<Limb>,
    digest: BigUint,
}

impl AssignedInputs {
    /// All limbs in layout order.
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Binding digest over every limb.
    pub fn digest(&self) -> &BigUint {
        &self.digest
    }

    /// Public input vector: public limbs in order, then the digest.
    pub fn public_inputs(&self) -> Vec<BigUint> {
        self.limbs
            .iter()
            .filter(|l| l.visibility == Visibility::Public)
            .map(|l| l.value.clone())
            .chain(std::iter::once(self.digest.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::BN254_SCALAR_MODULUS;
    use proptest::prelude::*;

    fn small_layout() -> CircuitLayout {
        CircuitLayout::new(
            "small",
            vec![SignalSpec::private("a", 2), SignalSpec::public("b", 1)],
        )
        .unwrap()
    }

    fn small_inputs(a: [&str; 2], b: &str) -> CircuitInputs {
        CircuitInputs::builder()
            .signal("a", a)
            .signal("b", [b])
            .build()
    }

    #[test]
    fn rsa_layout_counts() {
        let layout = CircuitLayout::rsa_2048();
        assert_eq!(layout.total_limbs(), 96);
        assert_eq!(layout.public_limb_count(), 32);
        assert_eq!(layout.public_input_count(), 33);
        assert_eq!(layout.signal("modulus").unwrap().visibility, Visibility::Public);
    }

    #[test]
    fn new_rejects_bad_tables() {
        assert_eq!(
            CircuitLayout::new("x", vec![]).unwrap_err(),
            LayoutError::Empty("x".into())
        );
        assert_eq!(
            CircuitLayout::new("x", vec![SignalSpec::private("a", 0)]).unwrap_err(),
            LayoutError::ZeroArity("a".into())
        );
        assert_eq!(
            CircuitLayout::new(
                "x",
                vec![SignalSpec::private("a", 1), SignalSpec::public("a", 1)]
            )
            .unwrap_err(),
            LayoutError::DuplicateSignal("a".into())
        );
        assert_eq!(
            CircuitLayout::new("x", vec![SignalSpec::private("", 1)]).unwrap_err(),
            LayoutError::EmptySignalName
        );
    }

    #[test]
    fn deserialization_validates() {
        let ok: CircuitLayout = serde_json::from_str(
            r#"{"name":"m","signals":[{"name":"a","arity":1},{"name":"c","arity":1,"visibility":"public"}]}"#,
        )
        .unwrap();
        assert_eq!(ok.public_input_count(), 2);
        assert_eq!(ok.signals()[0].visibility, Visibility::Private);

        let bad = serde_json::from_str::<CircuitLayout>(r#"{"name":"m","signals":[]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn assign_orders_public_inputs_with_digest_last() {
        let assigned = small_layout()
            .assign(&small_inputs(["1", "2"], "7"))
            .unwrap();
        let public = assigned.public_inputs();
        assert_eq!(public.len(), 2);
        assert_eq!(public[0], BigUint::from(7u8));
        assert_eq!(&public[1], assigned.digest());
        assert_eq!(assigned.limbs().len(), 3);
    }

    #[test]
    fn assign_rejects_unknown_signal() {
        let inputs = CircuitInputs::builder()
            .signal("a", ["1", "2"])
            .signal("b", ["3"])
            .signal("zzz", ["4"])
            .build();
        assert_eq!(
            small_layout().assign(&inputs).unwrap_err(),
            InputError::UnknownSignal("zzz".into())
        );
    }

    #[test]
    fn assign_rejects_missing_signal() {
        let inputs = CircuitInputs::builder().signal("a", ["1", "2"]).build();
        assert_eq!(
            small_layout().assign(&inputs).unwrap_err(),
            InputError::MissingSignal("b".into())
        );
    }

    #[test]
    fn assign_rejects_wrong_arity() {
        let inputs = CircuitInputs::builder()
            .signal("a", ["1"])
            .signal("b", ["3"])
            .build();
        assert_eq!(
            small_layout().assign(&inputs).unwrap_err(),
            InputError::ArityMismatch {
                signal: "a".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn assign_rejects_non_decimal_and_out_of_field() {
        let err = small_layout()
            .assign(&small_inputs(["1", "abc"], "3"))
            .unwrap_err();
        assert!(matches!(err, InputError::NotDecimal { index: 1, .. }));

        let err = small_layout()
            .assign(&small_inputs(["1", "2"], BN254_SCALAR_MODULUS))
            .unwrap_err();
        assert_eq!(
            err,
            InputError::OutOfField {
                signal: "b".into(),
                index: 0
            }
        );
    }

    proptest! {
        /// Any in-range u64 limbs assign, and the public vector length
        /// matches the declared count.
        #[test]
        fn u64_limbs_always_assign(a0 in any::<u64>(), a1 in any::<u64>(), b in any::<u64>()) {
            let layout = small_layout();
            let inputs = small_inputs([a0.to_string().as_str(), a1.to_string().as_str()], &b.to_string());
            let assigned = layout.assign(&inputs);
            prop_assert!(assigned.is_ok());
            prop_assert_eq!(assigned.unwrap().public_inputs().len(), layout.public_input_count());
        }

        /// Changing any private limb changes the digest.
        #[test]
        fn digest_binds_private_limbs(a0 in any::<u64>(), a1 in any::<u64>(), delta in 1u64..1000) {
            let layout = small_layout();
            let base = layout.assign(&small_inputs([a0.to_string().as_str(), a1.to_string().as_str()], "5")).unwrap();
            let bumped = a1 as u128 + delta as u128;
            let other = layout.assign(&small_inputs([a0.to_string().as_str(), bumped.to_string().as_str()], "5")).unwrap();
            prop_assert_ne!(base.digest(), other.digest());
        }
    }
}
