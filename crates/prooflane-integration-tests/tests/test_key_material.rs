//! Key material handling across the CLI setup path and the lifecycle.
//!
//! A key written by `prooflane setup` must initialize a file-backed
//! controller; missing, corrupt or mismatched key files must leave the
//! controller uninitialized.

use prooflane_cli::config::{BackendKind, ClientConfig};
use prooflane_cli::run::execute;
use prooflane_cli::setup::{run_setup, SetupArgs};
use prooflane_core::{CircuitInputs, CircuitLayout, SignalSpec};
use prooflane_state::{LifecycleError, LifecycleState, ProofLifecycle};
use prooflane_zkp::{generate_key_material, Groth16Backend, InitializationError, KeySource};

fn file_lifecycle(path: std::path::PathBuf) -> ProofLifecycle<Groth16Backend> {
    ProofLifecycle::new(Groth16Backend::new(
        CircuitLayout::rsa_2048(),
        KeySource::File { path },
    ))
}

#[test]
fn setup_then_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("rsa.pk");
    let config = ClientConfig::default();
    run_setup(&SetupArgs { out: out.clone(), seed: Some(5) }, &config).unwrap();

    let lifecycle = file_lifecycle(out);
    lifecycle.initialize().unwrap();
    assert_eq!(lifecycle.state(), LifecycleState::Ready);
    lifecycle.prove(&CircuitInputs::rsa_2048_example()).unwrap();
    assert!(lifecycle.verify().unwrap().value);
}

#[test]
fn config_file_drives_a_full_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rsa.pk"),
        generate_key_material(&CircuitLayout::rsa_2048(), 9).unwrap(),
    )
    .unwrap();
    let config_path = dir.path().join("prooflane.yaml");
    std::fs::write(&config_path, "backend: groth16\nkeys:\n  source: file\n  path: rsa.pk\n").unwrap();

    let config = ClientConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.backend, BackendKind::Groth16);
    let report = execute(config.backend(), &CircuitInputs::rsa_2048_example(), true).unwrap();
    assert!(report.valid);
    assert_eq!(report.calldata.unwrap().inputs.len(), 33);
}

#[test]
fn missing_key_file_stays_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let lifecycle = file_lifecycle(dir.path().join("nope.pk"));
    let err = lifecycle.initialize().unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Initialization(InitializationError::KeyMaterialMissing(_))
    ));
    assert_eq!(lifecycle.state(), LifecycleState::Uninitialized);
    assert!(matches!(
        lifecycle.prove(&CircuitInputs::rsa_2048_example()),
        Err(LifecycleError::NotInitialized)
    ));
}

#[test]
fn corrupt_key_file_stays_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsa.pk");
    let mut key = generate_key_material(&CircuitLayout::rsa_2048(), 1).unwrap();
    key.truncate(key.len() / 2);
    std::fs::write(&path, key).unwrap();

    let lifecycle = file_lifecycle(path);
    let err = lifecycle.initialize().unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Initialization(InitializationError::KeyMaterialCorrupt(_))
    ));
    assert_eq!(lifecycle.state(), LifecycleState::Uninitialized);
}

#[test]
fn key_for_another_layout_stays_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.pk");
    let small = CircuitLayout::new("small", vec![SignalSpec::public("n", 4)]).unwrap();
    std::fs::write(&path, generate_key_material(&small, 1).unwrap()).unwrap();

    let lifecycle = file_lifecycle(path);
    let err = lifecycle.initialize().unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Initialization(InitializationError::LayoutMismatch(_))
    ));
    assert_eq!(lifecycle.state(), LifecycleState::Uninitialized);
    assert!(lifecycle.transitions().is_empty());
}

#[test]
fn mock_config_runs_without_calldata() {
    let config = ClientConfig {
        backend: BackendKind::Mock,
        ..ClientConfig::default()
    };
    let report = execute(config.backend(), &CircuitInputs::rsa_2048_example(), true).unwrap();
    assert!(report.valid);
    assert!(report.calldata.is_none());
    assert_eq!(report.state, LifecycleState::Verified);
}
