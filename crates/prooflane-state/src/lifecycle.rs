//! # Proof Lifecycle
//!
//! [`ProofLifecycle`] drives an [`EngineClient`] through the proof lifecycle
//! and keeps the latest [`ProofArtifacts`] in a single replace-on-write slot.
//!
//! ## Concurrency
//!
//! At most one operation runs per controller. An atomic in-flight flag is
//! taken with compare-exchange; a second caller gets
//! [`LifecycleError::Busy`] instead of queueing. The state and the stored
//! pair sit behind a `parking_lot::RwLock` that is write-locked only for the
//! replacement, so [`state`](ProofLifecycle::state) and
//! [`latest`](ProofLifecycle::latest) never wait on a running proof.
//!
//! ## Failure Semantics
//!
//! A failed operation changes nothing: state, stored pair and transition log
//! are exactly as before the call.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prooflane_core::{CircuitInputs, CircuitLayout, ProofArtifacts};
use prooflane_zkp::{
    EngineClient, InitializationError, MalformedProofError, ProofBackend, ProvingError, Timed,
    VerificationError, VerifierCalldata,
};

/// Number of transitions retained in the log.
pub const TRANSITION_LOG_CAPACITY: usize = 32;

// ─── State ───────────────────────────────────────────────────────────

/// Lifecycle state of a [`ProofLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Backend not set up yet.
    Uninitialized,
    /// Backend set up, no proof stored.
    Ready,
    /// A proof is stored and has not been verified since it was produced.
    ProofAvailable,
    /// The stored proof has been verified (with either outcome).
    Verified,
}

impl LifecycleState {
    /// The canonical string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Ready => "READY",
            Self::ProofAvailable => "PROOF_AVAILABLE",
            Self::Verified => "VERIFIED",
        }
    }

    /// Parse a canonical state name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNINITIALIZED" => Some(Self::Uninitialized),
            "READY" => Some(Self::Ready),
            "PROOF_AVAILABLE" => Some(Self::ProofAvailable),
            "VERIFIED" => Some(Self::Verified),
            _ => None,
        }
    }

    /// States reachable in one successful operation.
    pub fn valid_transitions(&self) -> &'static [LifecycleState] {
        match self {
            Self::Uninitialized => &[Self::Ready],
            Self::Ready => &[Self::ProofAvailable],
            Self::ProofAvailable | Self::Verified => &[Self::ProofAvailable, Self::Verified],
        }
    }

    /// Whether the backend has been set up.
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Whether a proof pair is stored.
    pub fn has_proof(&self) -> bool {
        matches!(self, Self::ProofAvailable | Self::Verified)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operation that caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOperation {
    /// Backend key setup.
    Initialize,
    /// Proof generation.
    Prove,
    /// Verification of the stored pair.
    Verify,
}

impl LifecycleOperation {
    /// Lowercase name, as used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Prove => "prove",
            Self::Verify => "verify",
        }
    }
}

impl std::fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Transition Record ────────────────────────────────────────────────

/// One successful state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State before the operation.
    pub from: LifecycleState,
    /// State after the operation.
    pub to: LifecycleState,
    pub operation: LifecycleOperation,
    /// When the operation completed.
    pub at: DateTime<Utc>,
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors surfaced by [`ProofLifecycle`].
///
/// Backend errors are wrapped transparently, keeping their message.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),
    /// `prove` was called before a successful `initialize`.
    #[error("proof engine is not initialized")]
    NotInitialized,
    #[error(transparent)]
    Proving(#[from] ProvingError),
    /// `verify` was called with no stored proof.
    #[error("no proof available to verify")]
    NoProofAvailable,
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    MalformedProof(#[from] MalformedProofError),
    /// Another operation is in flight on this controller.
    #[error("another lifecycle operation is in progress")]
    Busy,
}

// ─── Controller ──────────────────────────────────────────────────────

#[derive(Debug)]
struct Slot {
    state: LifecycleState,
    latest: Option<Arc<ProofArtifacts>>,
    transitions: VecDeque<TransitionRecord>,
}

impl Slot {
    fn transition(&mut self, to: LifecycleState, operation: LifecycleOperation) {
        let from = self.state;
        debug_assert!(
            from.valid_transitions().contains(&to),
            "{from} -> {to} is not a lifecycle transition"
        );
        tracing::debug!(%from, %to, %operation, "lifecycle transition");
        if self.transitions.len() == TRANSITION_LOG_CAPACITY {
            self.transitions.pop_front();
        }
        self.transitions.push_back(TransitionRecord {
            from,
            to,
            operation,
            at: Utc::now(),
        });
        self.state = to;
    }
}

/// Clears the in-flight flag on drop.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State machine over one proof backend.
#[derive(Debug)]
pub struct ProofLifecycle<B> {
    client: EngineClient<B>,
    slot: RwLock<Slot>,
    in_flight: AtomicBool,
}

impl<B: ProofBackend> ProofLifecycle<B> {
    /// A controller in [`LifecycleState::Uninitialized`].
    pub fn new(backend: B) -> Self {
        Self {
            client: EngineClient::new(backend),
            slot: RwLock::new(Slot {
                state: LifecycleState::Uninitialized,
                latest: None,
                transitions: VecDeque::with_capacity(TRANSITION_LOG_CAPACITY),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    fn begin(&self) -> Result<InFlight<'_>, LifecycleError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| LifecycleError::Busy)
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.slot.read().state
    }

    /// The stored proof pair, if any.
    pub fn latest(&self) -> Option<Arc<ProofArtifacts>> {
        self.slot.read().latest.clone()
    }

    /// Recent transitions, oldest first.
    pub fn transitions(&self) -> Vec<TransitionRecord> {
        self.slot.read().transitions.iter().cloned().collect()
    }

    /// Layout of the underlying backend.
    pub fn layout(&self) -> &CircuitLayout {
        self.client.layout()
    }

    /// The timed client, for direct backend calls that bypass the state.
    pub fn client(&self) -> &EngineClient<B> {
        &self.client
    }

    /// Set up the backend. From `Uninitialized` this moves to `Ready`; in
    /// any other state the backend is called again and the state is kept.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Initialization`] if the backend cannot load its
    /// keys, [`LifecycleError::Busy`] if another operation is running.
    pub fn initialize(&self) -> Result<Duration, LifecycleError> {
        let _guard = self.begin()?;
        let done = self.client.initialize()?;

        let mut slot = self.slot.write();
        if slot.state == LifecycleState::Uninitialized {
            slot.transition(LifecycleState::Ready, LifecycleOperation::Initialize);
        }
        Ok(done.elapsed)
    }

    /// Generate a proof and make it the stored pair.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NotInitialized`] before a successful `initialize`
    /// (the backend is not called), or the wrapped [`ProvingError`]. On
    /// error the previous pair stays stored.
    pub fn prove(
        &self,
        inputs: &CircuitInputs,
    ) -> Result<Timed<Arc<ProofArtifacts>>, LifecycleError> {
        let _guard = self.begin()?;
        if !self.state().is_initialized() {
            return Err(LifecycleError::NotInitialized);
        }

        let done = self.client.prove(inputs)?.map(Arc::new);

        let mut slot = self.slot.write();
        slot.latest = Some(Arc::clone(&done.value));
        slot.transition(LifecycleState::ProofAvailable, LifecycleOperation::Prove);
        Ok(done)
    }

    /// Verify the stored pair. Moves to `Verified` whatever the outcome;
    /// an invalid proof is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NoProofAvailable`] with nothing stored (the backend
    /// is not called), or the wrapped [`VerificationError`].
    pub fn verify(&self) -> Result<Timed<bool>, LifecycleError> {
        let _guard = self.begin()?;
        let artifacts = self.latest().ok_or(LifecycleError::NoProofAvailable)?;

        let done = self
            .client
            .verify(&artifacts.proof, &artifacts.public_inputs)?;

        self.slot
            .write()
            .transition(LifecycleState::Verified, LifecycleOperation::Verify);
        Ok(done)
    }

    /// Convert the stored pair into verifier calldata. Does not change state
    /// and does not require the pair to have been verified.
    pub fn verifier_format(&self) -> Result<VerifierCalldata, LifecycleError> {
        let artifacts = self.latest().ok_or(LifecycleError::NoProofAvailable)?;
        Ok(VerifierCalldata::from_artifacts(&artifacts)?)
    }
}
