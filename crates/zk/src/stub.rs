//! Scripted prover for development and tests.
//!
//! Returns a configured outcome without spawning anything. Tracks how many
//! invocations ran and how many overlapped, so callers can assert on
//! concurrency limits.
//!
//! **Warning**: Provides no cryptographic guarantees - do not use in production.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use memory_core::{ProofOutcome, Telemetry};

use crate::prover::ProverInvoker;

#[derive(Debug, Clone)]
pub struct ScriptedProver {
    outcome: ProofOutcome,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
    peak_active: Arc<AtomicUsize>,
}

impl ScriptedProver {
    pub fn new(outcome: ProofOutcome) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            active: Arc::new(AtomicUsize::new(0)),
            peak_active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Verifies every game, reporting `score` as the prover's final score.
    pub fn verified(score: Option<u32>) -> Self {
        Self::new(ProofOutcome::Verified { score })
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(ProofOutcome::failed(reason))
    }

    /// Sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of invocations observed running at once.
    pub fn peak_active(&self) -> usize {
        self.peak_active.load(Ordering::SeqCst)
    }
}

struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProverInvoker for ScriptedProver {
    async fn invoke(&self, _telemetry: &Telemetry) -> ProofOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = ActiveGuard(&self.active);
        self.peak_active.fetch_max(now_active, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
