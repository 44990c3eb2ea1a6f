//! Proving outcome metrics.
//!
//! Tracks how requests were resolved and how many external prover
//! invocations are running. Uses atomics for lock-free access across request
//! tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Default)]
pub struct BridgeMetrics {
    /// Requests answered with a verified, real record
    verified: AtomicU64,

    /// Prover runs that finished without the verification marker
    unverified: AtomicU64,

    /// Prover runs that could not be spawned or exited with an error
    failed: AtomicU64,

    /// Prover runs cut off by the request timeout
    timeouts: AtomicU64,

    /// Requests answered with a simulated record
    simulated: AtomicU64,

    /// Prover invocations currently holding a concurrency permit
    in_flight: AtomicU64,

    /// Peak concurrent prover invocations observed
    peak_in_flight: AtomicU64,

    /// Total time spent in verified prover runs, in nanoseconds
    total_proving_time_nanos: AtomicU64,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_verified(&self, proving_time: Duration) {
        self.verified.fetch_add(1, Ordering::Relaxed);
        self.total_proving_time_nanos
            .fetch_add(proving_time.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_unverified(&self) {
        self.unverified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// A timeout also counts as a failed prover run.
    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
        self.record_failed();
    }

    pub fn record_simulated(&self) {
        self.simulated.fetch_add(1, Ordering::Relaxed);
    }

    /// Marks a prover invocation as started and tracks the peak.
    ///
    /// The returned guard marks it finished when dropped, including when the
    /// request is cancelled mid-invocation.
    pub fn enter_prover(&self) -> InFlightGuard<'_> {
        let depth = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak_in_flight.fetch_max(depth, Ordering::Relaxed);
        InFlightGuard { metrics: self }
    }

    pub fn verified(&self) -> u64 {
        self.verified.load(Ordering::Relaxed)
    }

    pub fn unverified(&self) -> u64 {
        self.unverified.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn timeouts(&self) -> u64 {
        self.timeouts.load(Ordering::Relaxed)
    }

    pub fn simulated(&self) -> u64 {
        self.simulated.load(Ordering::Relaxed)
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn peak_in_flight(&self) -> u64 {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    /// Average duration of verified prover runs.
    pub fn avg_proving_time(&self) -> Duration {
        let verified = self.verified();
        if verified == 0 {
            Duration::ZERO
        } else {
            let total_nanos = self.total_proving_time_nanos.load(Ordering::Relaxed);
            Duration::from_nanos(total_nanos / verified)
        }
    }

    /// Share of answered requests that carried a real proof, as a percentage.
    pub fn real_proof_rate(&self) -> f64 {
        let verified = self.verified();
        let total = verified + self.simulated();
        if total == 0 {
            0.0
        } else {
            (verified as f64 / total as f64) * 100.0
        }
    }

    /// Creates a snapshot of all metrics for display/logging.
    ///
    /// Individual fields are read atomically, the snapshot as a whole is not.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            verified: self.verified(),
            unverified: self.unverified(),
            failed: self.failed(),
            timeouts: self.timeouts(),
            simulated: self.simulated(),
            in_flight: self.in_flight(),
            peak_in_flight: self.peak_in_flight(),
            avg_proving_time_ms: self.avg_proving_time().as_millis() as u64,
            real_proof_rate: self.real_proof_rate(),
        }
    }
}

/// Decrements the in-flight gauge on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    metrics: &'a BridgeMetrics,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub verified: u64,
    pub unverified: u64,
    pub failed: u64,
    pub timeouts: u64,
    pub simulated: u64,
    pub in_flight: u64,
    pub peak_in_flight: u64,
    pub avg_proving_time_ms: u64,
    pub real_proof_rate: f64,
}
