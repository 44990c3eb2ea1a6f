//! Prover invocation interface.
//!
//! The bridge only sees [`ProverInvoker`], so the process-backed prover can be
//! replaced by a scripted one in tests or by a remote prover later on.

use async_trait::async_trait;
use memory_core::{ProofOutcome, Telemetry};

/// Runs one proving attempt for a game.
///
/// Implementations never fail: spawn errors, IO errors and rejected proofs are
/// all reported as a [`ProofOutcome`]. Cancellation happens by dropping the
/// returned future, so implementations must not leave work running after
/// being dropped.
#[async_trait]
pub trait ProverInvoker: Send + Sync {
    async fn invoke(&self, telemetry: &Telemetry) -> ProofOutcome;

    /// Short human-readable name used in logs.
    fn name(&self) -> &str {
        "prover"
    }
}
