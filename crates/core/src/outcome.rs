//! Classified result of one attempt to run the external prover.

use std::fmt;

/// Reason recorded when the prover exceeds its time budget.
pub const TIMEOUT_REASON: &str = "timeout";

/// Outcome of a single proving attempt. Produced once per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofOutcome {
    /// The prover exited successfully and printed the verification marker.
    ///
    /// `score` carries the prover's `FINAL_SCORE` when it reported one; it
    /// takes precedence over the locally computed score in the record.
    Verified { score: Option<u32> },

    /// The prover ran to completion without confirming the proof.
    Unverified,

    /// The prover could not be spawned, errored, or timed out.
    Failed { reason: String },
}

impl ProofOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        ProofOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn timeout() -> Self {
        Self::failed(TIMEOUT_REASON)
    }

    pub const fn is_verified(&self) -> bool {
        matches!(self, ProofOutcome::Verified { .. })
    }

    /// Prover-reported score, if the outcome carries one.
    pub const fn verified_score(&self) -> Option<u32> {
        match self {
            ProofOutcome::Verified { score } => *score,
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ProofOutcome::Verified { .. } => "verified",
            ProofOutcome::Unverified => "unverified",
            ProofOutcome::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for ProofOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofOutcome::Verified { score: Some(score) } => {
                write!(f, "verified (score {})", score)
            }
            ProofOutcome::Verified { score: None } => write!(f, "verified"),
            ProofOutcome::Unverified => write!(f, "unverified"),
            ProofOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
