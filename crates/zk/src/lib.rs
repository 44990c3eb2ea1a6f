//! External prover invocation for memory game scores.
//!
//! The real SP1 prover is an opaque command-line program. This crate knows
//! how to launch it, how to read its report, and how to turn that report into
//! a [`ProofOutcome`]:
//!
//! - [`prover`] defines the [`ProverInvoker`] seam the bridge depends on
//! - [`output`] classifies captured stdout/stderr and exit status
//! - [`process`] spawns the prover as a child process ([`ProcessProver`])
//! - `stub` (feature `stub`) provides a scripted in-memory prover for tests
//!
//! The `memory-prove-stub` binary is a drop-in stand-in for the SP1 host
//! script that prints the same markers without doing any cryptography.

pub mod output;
pub mod process;
pub mod prover;

#[cfg(feature = "stub")]
pub mod stub;

pub use output::{
    FINAL_SCORE_MARKER, FinalScoreError, ProverOutput, VERIFICATION_MARKER, parse_final_score,
};
pub use process::{ProcessProver, ProverCommand};
pub use prover::ProverInvoker;

#[cfg(feature = "stub")]
pub use stub::ScriptedProver;

pub use memory_core::{ProofOutcome, Telemetry};
