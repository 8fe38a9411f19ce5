//! # Limb-Binding Circuit
//!
//! R1CS relation proved by the Groth16 backend. Every limb of the layout is
//! allocated (public limbs as instance variables, private limbs as
//! witnesses) and folded into a Horner chain that must equal the trailing
//! public `digest` input:
//!
//! ```text
//! acc_0     = limb_0
//! acc_{k+1} = acc_k * B + limb_{k+1}        one constraint per step
//! acc_n * 1 = digest
//! ```
//!
//! `B` is [`DIGEST_BASE`]; the host-side value comes from
//! [`prooflane_core::binding_digest`].

use ark_bn254::Fr;
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef, LinearCombination,
    SynthesisError, SynthesisMode, Variable,
};

use prooflane_core::{AssignedInputs, CircuitLayout, Visibility, DIGEST_BASE};

use crate::codec::to_scalar;

/// Variable and constraint counts of the relation for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitShape {
    /// Instance variables, including the constant one.
    pub instance_variables: usize,
    pub witness_variables: usize,
    pub constraints: usize,
}

impl CircuitShape {
    /// Instance plus witness variables.
    pub fn total_variables(&self) -> usize {
        self.instance_variables + self.witness_variables
    }
}

/// The limb-binding relation for one layout.
#[derive(Debug, Clone)]
pub struct LimbCircuit {
    limbs: Vec<(Visibility, Option<Fr>)>,
    digest: Option<Fr>,
}

impl LimbCircuit {
    /// Shape-only instance for key generation.
    pub fn blank(layout: &CircuitLayout) -> Self {
        let limbs = layout
            .signals()
            .iter()
            .flat_map(|s| std::iter::repeat((s.visibility, None)).take(s.arity))
            .collect();
        Self {
            limbs,
            digest: None,
        }
    }

    /// Fully assigned instance for proving.
    pub fn assigned(inputs: &AssignedInputs) -> Self {
        let limbs = inputs
            .limbs()
            .iter()
            .map(|l| (l.visibility, Some(to_scalar(&l.value))))
            .collect();
        Self {
            limbs,
            digest: Some(to_scalar(inputs.digest())),
        }
    }

    /// Number of limbs.
    pub fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    /// Synthesize the blank relation for `layout` and count its variables.
    pub fn shape(layout: &CircuitLayout) -> Result<CircuitShape, SynthesisError> {
        let cs = ConstraintSystem::<Fr>::new_ref();
        cs.set_mode(SynthesisMode::Setup);
        Self::blank(layout).generate_constraints(cs.clone())?;
        Ok(CircuitShape {
            instance_variables: cs.num_instance_variables(),
            witness_variables: cs.num_witness_variables(),
            constraints: cs.num_constraints(),
        })
    }
}

impl ConstraintSynthesizer<Fr> for LimbCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let base = Fr::from(DIGEST_BASE);
        let mut acc: Option<(LinearCombination<Fr>, Option<Fr>)> = None;

        for (visibility, value) in self.limbs {
            let limb = match visibility {
                Visibility::Public => {
                    cs.new_input_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?
                }
                Visibility::Private => {
                    cs.new_witness_variable(|| value.ok_or(SynthesisError::AssignmentMissing))?
                }
            };

            acc = Some(match acc {
                None => (LinearCombination::from(limb), value),
                Some((acc_lc, acc_value)) => {
                    let next_value = acc_value.zip(value).map(|(a, x)| a * base + x);
                    let next = cs.new_witness_variable(|| {
                        next_value.ok_or(SynthesisError::AssignmentMissing)
                    })?;
                    // acc * B = next - limb
                    cs.enforce_constraint(
                        acc_lc,
                        LinearCombination::from((base, Variable::One)),
                        LinearCombination::from(next) - limb,
                    )?;
                    (LinearCombination::from(next), next_value)
                }
            });
        }

        let (acc_lc, _) = acc.ok_or(SynthesisError::Unsatisfiable)?;
        let digest_value = self.digest;
        let digest =
            cs.new_input_variable(|| digest_value.ok_or(SynthesisError::AssignmentMissing))?;
        cs.enforce_constraint(
            acc_lc,
            LinearCombination::from(Variable::One),
            LinearCombination::from(digest),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prooflane_core::{CircuitInputs, SignalSpec};

    fn synthesize(circuit: LimbCircuit) -> ConstraintSystemRef<Fr> {
        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        cs
    }

    #[test]
    fn rsa_example_satisfies_circuit() {
        let layout = CircuitLayout::rsa_2048();
        let assigned = layout.assign(&CircuitInputs::rsa_2048_example()).unwrap();
        let cs = synthesize(LimbCircuit::assigned(&assigned));
        assert!(cs.is_satisfied().unwrap());
        // Instance variables include the constant one.
        assert_eq!(cs.num_instance_variables(), layout.public_input_count() + 1);
        assert_eq!(cs.num_constraints(), layout.total_limbs());
    }

    #[test]
    fn wrong_digest_is_unsatisfied() {
        let layout = CircuitLayout::rsa_2048();
        let assigned = layout.assign(&CircuitInputs::rsa_2048_example()).unwrap();
        let mut circuit = LimbCircuit::assigned(&assigned);
        circuit.digest = circuit.digest.map(|d| d + Fr::from(1u64));
        let cs = synthesize(circuit);
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn blank_matches_layout_shape() {
        let layout = CircuitLayout::rsa_2048();
        let blank = LimbCircuit::blank(&layout);
        assert_eq!(blank.limb_count(), 96);
        assert!(blank.digest.is_none());
    }

    #[test]
    fn rsa_shape_counts() {
        let shape = LimbCircuit::shape(&CircuitLayout::rsa_2048()).unwrap();
        // one + 32 modulus limbs + digest
        assert_eq!(shape.instance_variables, 34);
        // 64 private limbs + 95 chain accumulators
        assert_eq!(shape.witness_variables, 64 + 95);
        assert_eq!(shape.constraints, 96);
    }

    #[test]
    fn private_arity_changes_shape_not_public_width() {
        let narrow = CircuitLayout::new(
            "narrow",
            vec![SignalSpec::private("secret", 2), SignalSpec::public("commitment", 1)],
        )
        .unwrap();
        let wide = CircuitLayout::new(
            "wide",
            vec![SignalSpec::private("secret", 5), SignalSpec::public("commitment", 1)],
        )
        .unwrap();
        let narrow = LimbCircuit::shape(&narrow).unwrap();
        let wide = LimbCircuit::shape(&wide).unwrap();
        assert_eq!(narrow.instance_variables, wide.instance_variables);
        assert_ne!(narrow.total_variables(), wide.total_variables());
    }
}
