//! Verifier-format conversion of real Groth16 proofs.

use prooflane_core::{CircuitInputs, CircuitLayout, SignalSpec};
use prooflane_state::ProofLifecycle;
use prooflane_zkp::{
    to_verifier_inputs, to_verifier_proof, Groth16Backend, KeySource, VerifierCalldata,
};
use proptest::prelude::*;

fn pair_layout() -> CircuitLayout {
    CircuitLayout::new(
        "pair",
        vec![SignalSpec::private("secret", 2), SignalSpec::public("commitment", 2)],
    )
    .unwrap()
}

#[test]
fn conversion_of_stored_pair_is_deterministic() {
    let lifecycle = ProofLifecycle::new(Groth16Backend::new(
        CircuitLayout::rsa_2048(),
        KeySource::Setup { seed: 1 },
    ));
    lifecycle.initialize().unwrap();
    let stored = lifecycle.prove(&CircuitInputs::rsa_2048_example()).unwrap().value;

    let first = lifecycle.verifier_format().unwrap();
    let second = lifecycle.verifier_format().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, VerifierCalldata::from_artifacts(&stored).unwrap());
    assert_eq!(first.proof, to_verifier_proof(&stored.proof).unwrap());
}

#[test]
fn conversion_does_not_require_verification() {
    let lifecycle = ProofLifecycle::new(Groth16Backend::new(pair_layout(), KeySource::default()));
    lifecycle.initialize().unwrap();
    let inputs = CircuitInputs::builder()
        .signal_u64("secret", [1, 2])
        .signal_u64("commitment", [3, 4])
        .build();
    lifecycle.prove(&inputs).unwrap();

    let calldata = lifecycle.verifier_format().unwrap();
    let digest = pair_layout().assign(&inputs).unwrap().digest().to_string();
    assert_eq!(
        calldata.inputs.as_slice(),
        ["3".to_string(), "4".to_string(), digest]
    );
}

#[test]
fn calldata_json_shape() {
    let lifecycle = ProofLifecycle::new(Groth16Backend::new(pair_layout(), KeySource::default()));
    lifecycle.initialize().unwrap();
    let inputs = CircuitInputs::builder()
        .signal_u64("secret", [5, 6])
        .signal_u64("commitment", [7, 8])
        .build();
    lifecycle.prove(&inputs).unwrap();

    let json = serde_json::to_value(lifecycle.verifier_format().unwrap()).unwrap();
    assert!(json["proof"]["a"]["x"].is_string());
    assert_eq!(json["proof"]["b"]["x"].as_array().unwrap().len(), 2);
    assert_eq!(json["proof"]["b"]["y"].as_array().unwrap().len(), 2);
    assert_eq!(json["inputs"].as_array().unwrap().len(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn public_limbs_appear_verbatim(a in any::<u64>(), b in any::<u64>()) {
        let lifecycle = ProofLifecycle::new(Groth16Backend::new(pair_layout(), KeySource::default()));
        lifecycle.initialize().unwrap();
        let inputs = CircuitInputs::builder()
            .signal_u64("secret", [0, 0])
            .signal_u64("commitment", [a, b])
            .build();
        let stored = lifecycle.prove(&inputs).unwrap().value;

        prop_assert!(lifecycle.verify().unwrap().value);
        let rendered = to_verifier_inputs(&stored.public_inputs).unwrap();
        let expected = [a.to_string(), b.to_string()];
        prop_assert_eq!(&rendered.as_slice()[..2], &expected[..]);
    }
}
