//! # prooflane-state: Proof Lifecycle Controller
//!
//! Sequences initialize → prove → verify over one proof backend and owns the
//! only cross-stage artifact, the most recent proof/public-input pair.
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──initialize──▶ Ready ──prove──▶ ProofAvailable ──verify──▶ Verified
//!                                                   ▲    │ prove               │
//!                                                   └────┴─────── prove ◀──────┘
//! ```
//!
//! There is no terminal state. The state is a runtime value rather than a
//! typestate: a controller is shared behind `Arc` and driven by callers that
//! cannot consume it.

pub mod lifecycle;

pub use lifecycle::{
    LifecycleError, LifecycleOperation, LifecycleState, ProofLifecycle, TransitionRecord,
    TRANSITION_LOG_CAPACITY,
};
