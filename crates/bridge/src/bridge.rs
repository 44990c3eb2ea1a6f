//! Proof orchestration.
//!
//! [`Bridge::prove`] walks a fixed state machine per request:
//!
//! ```text
//! Start -> TryReal -> Verified                -> Respond
//!                  -> Unverified | Failed -> Simulate -> Respond
//! Start -> (no prover) -------------------> Simulate -> Respond
//! ```
//!
//! Prover problems never reach the caller. They are reported on the
//! narrative and answered with a simulated record. That includes a verified
//! run whose reported score does not fit the record.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use memory_core::{ProofOutcome, ProofRecord, SimulatedStyle, Telemetry, encode};
use memory_zk::{ProcessProver, ProverInvoker};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::metrics::BridgeMetrics;
use crate::narrative::NarrativeSink;
use crate::simulation::{SimulationEngine, SimulationPacing};

/// Request lifecycle stages, used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TryReal,
    Simulate,
    Respond,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Start => "start",
            Stage::TryReal => "try_real",
            Stage::Simulate => "simulate",
            Stage::Respond => "respond",
        };
        write!(f, "{}", label)
    }
}

/// Turns game telemetry into proof records.
///
/// Cheap to clone; clones share the prover, the concurrency permits and the
/// metrics.
#[derive(Clone)]
pub struct Bridge {
    invoker: Option<Arc<dyn ProverInvoker>>,
    simulation: SimulationEngine,
    permits: Arc<Semaphore>,
    prover_timeout: Duration,
    metrics: Arc<BridgeMetrics>,
}

impl Bridge {
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    /// Bridge backed by a [`ProcessProver`] when `config.prover` is set.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn metrics(&self) -> &Arc<BridgeMetrics> {
        &self.metrics
    }

    pub fn has_prover(&self) -> bool {
        self.invoker.is_some()
    }

    pub fn prover_timeout(&self) -> Duration {
        self.prover_timeout
    }

    /// Validates a JSON request body and proves it.
    pub async fn prove_json(
        &self,
        body: &serde_json::Value,
        narrative: &dyn NarrativeSink,
    ) -> Result<ProofRecord> {
        let telemetry = Telemetry::from_json(body)?;
        self.prove(&telemetry, narrative).await
    }

    /// Produces a proof record for one game.
    ///
    /// Returns a real record when the prover verified the game and a
    /// simulated one otherwise. Fails only if the simulated record cannot be
    /// encoded, which validated telemetry never triggers.
    pub async fn prove(
        &self,
        telemetry: &Telemetry,
        narrative: &dyn NarrativeSink,
    ) -> Result<ProofRecord> {
        let local = telemetry.score();
        debug!(
            stage = %Stage::Start,
            moves = telemetry.moves(),
            time = telemetry.elapsed_seconds(),
            matched_pairs = telemetry.matched_pairs(),
            score = local.score,
            "Proof requested"
        );

        narrative.log_line("SP1 Proof system initializing...");
        narrative.log_line(&format!(
            "Score: {}, Moves: {}, Time: {}s",
            local.score,
            telemetry.moves(),
            telemetry.elapsed_seconds()
        ));
        narrative.log_line("Running SP1 ZK program...");

        let Some(invoker) = &self.invoker else {
            debug!(stage = %Stage::Simulate, "No prover configured");
            narrative.log_line("Switching to simulation mode...");
            return self
                .simulate(telemetry, SimulatedStyle::Compact, narrative)
                .await;
        };

        narrative.log_line("Connecting to SP1 backend...");
        let (outcome, proving_time) = self.try_real(invoker.as_ref(), telemetry).await;

        let reason = match &outcome {
            ProofOutcome::Verified { .. } => {
                match encode(local, &outcome, telemetry, SimulatedStyle::Tagged) {
                    Ok(record) => {
                        self.metrics.record_verified(proving_time);
                        narrative.log_line("SP1 Proof successfully generated!");
                        narrative.log_line(&format!("Proof Hash: {}", record.hash()));
                        narrative.show_result(&record);
                        info!(
                            stage = %Stage::Respond,
                            hash = record.hash(),
                            score = record.score(),
                            "Real proof record"
                        );
                        return Ok(record);
                    }
                    // A verified score the record cannot carry is a prover fault.
                    Err(e) => {
                        warn!(stage = %Stage::TryReal, "Rejected verified outcome: {}", e);
                        self.metrics.record_failed();
                        e.to_string()
                    }
                }
            }
            ProofOutcome::Unverified => {
                narrative.log_line("Switching to simulation mode...");
                return self
                    .simulate(telemetry, SimulatedStyle::Tagged, narrative)
                    .await;
            }
            ProofOutcome::Failed { reason } => reason.clone(),
        };

        narrative.log_line(&format!("Error: {}", reason));
        narrative.log_line("Falling back to simulation mode...");
        self.simulate(telemetry, SimulatedStyle::Tagged, narrative)
            .await
    }

    /// Runs the prover under the concurrency limit and the request timeout.
    ///
    /// The timeout starts before the permit is requested, so time spent
    /// queueing counts against it. Returns the outcome with the time spent
    /// inside the prover. Verified runs are counted by the caller once the
    /// record is encoded.
    async fn try_real(
        &self,
        invoker: &dyn ProverInvoker,
        telemetry: &Telemetry,
    ) -> (ProofOutcome, Duration) {
        debug!(stage = %Stage::TryReal, prover = invoker.name(), "Waiting for prover permit");

        let attempt = async {
            let Ok(_permit) = self.permits.acquire().await else {
                return (ProofOutcome::failed("prover pool closed"), Duration::ZERO);
            };
            let _in_flight = self.metrics.enter_prover();
            let started = Instant::now();

            let outcome = invoker.invoke(telemetry).await;
            match &outcome {
                ProofOutcome::Verified { .. } => {}
                ProofOutcome::Unverified => self.metrics.record_unverified(),
                ProofOutcome::Failed { .. } => self.metrics.record_failed(),
            }
            (outcome, started.elapsed())
        };

        match tokio::time::timeout(self.prover_timeout, attempt).await {
            Ok((outcome, proving_time)) => {
                debug!(stage = %Stage::TryReal, outcome = outcome.label(), "Prover finished");
                (outcome, proving_time)
            }
            Err(_) => {
                warn!(
                    stage = %Stage::TryReal,
                    timeout_secs = self.prover_timeout.as_secs_f64(),
                    "Prover timed out"
                );
                self.metrics.record_timeout();
                (ProofOutcome::timeout(), self.prover_timeout)
            }
        }
    }

    async fn simulate(
        &self,
        telemetry: &Telemetry,
        style: SimulatedStyle,
        narrative: &dyn NarrativeSink,
    ) -> Result<ProofRecord> {
        let record = self.simulation.simulate(telemetry, style, narrative).await?;
        self.metrics.record_simulated();
        info!(
            stage = %Stage::Respond,
            hash = record.hash(),
            score = record.score(),
            "Simulated proof record"
        );
        Ok(record)
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("prover", &self.invoker.as_ref().map(|invoker| invoker.name()))
            .field("simulation", &self.simulation)
            .field("available_permits", &self.permits.available_permits())
            .field("prover_timeout", &self.prover_timeout)
            .finish()
    }
}

/// Builder for [`Bridge`].
///
/// Starts without a prover, so an unconfigured builder yields a
/// simulation-only bridge.
pub struct BridgeBuilder {
    invoker: Option<Arc<dyn ProverInvoker>>,
    pacing: SimulationPacing,
    prover_timeout: Duration,
    max_concurrent_provers: usize,
    metrics: Option<Arc<BridgeMetrics>>,
}

impl BridgeBuilder {
    fn new() -> Self {
        Self {
            invoker: None,
            pacing: SimulationPacing::default(),
            prover_timeout: BridgeConfig::DEFAULT_PROVER_TIMEOUT,
            max_concurrent_provers: BridgeConfig::DEFAULT_MAX_CONCURRENT_PROVERS,
            metrics: None,
        }
    }

    /// Apply settings from configuration, including the process prover.
    pub fn config(mut self, config: &BridgeConfig) -> Self {
        self.invoker = config
            .prover
            .clone()
            .map(|command| Arc::new(ProcessProver::new(command)) as Arc<dyn ProverInvoker>);
        self.pacing = config.pacing;
        self.prover_timeout = config.prover_timeout;
        self.max_concurrent_provers = config.max_concurrent_provers;
        self
    }

    /// Set the prover used for the real path
    pub fn invoker(mut self, invoker: impl ProverInvoker + 'static) -> Self {
        self.invoker = Some(Arc::new(invoker));
        self
    }

    pub fn shared_invoker(mut self, invoker: Arc<dyn ProverInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Remove the prover; every request is simulated.
    pub fn without_prover(mut self) -> Self {
        self.invoker = None;
        self
    }

    pub fn pacing(mut self, pacing: SimulationPacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn prover_timeout(mut self, timeout: Duration) -> Self {
        self.prover_timeout = timeout;
        self
    }

    /// Clamped to at least one.
    pub fn max_concurrent_provers(mut self, limit: usize) -> Self {
        self.max_concurrent_provers = limit.max(1);
        self
    }

    /// Share metrics with another component.
    pub fn metrics(mut self, metrics: Arc<BridgeMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> Bridge {
        let limit = self.max_concurrent_provers.max(1);
        info!(
            prover = self.invoker.as_ref().map(|invoker| invoker.name()).unwrap_or("none"),
            max_concurrent_provers = limit,
            prover_timeout_secs = self.prover_timeout.as_secs(),
            pacing = %self.pacing,
            "Proof bridge ready"
        );

        Bridge {
            invoker: self.invoker,
            simulation: SimulationEngine::new(self.pacing),
            permits: Arc::new(Semaphore::new(limit)),
            prover_timeout: self.prover_timeout,
            metrics: self.metrics.unwrap_or_default(),
        }
    }
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
