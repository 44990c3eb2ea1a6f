//! Simulated proving narrative.
//!
//! When the external prover is unreachable or does not verify, the player
//! still sees the full proving sequence. The steps are fixed in content and
//! order; the delays between them only pace the presentation.
//!
//! The whole sequence runs inside the caller's future, so dropping that
//! future (request abandoned) stops the remaining steps.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use memory_core::{EncodingError, ProofOutcome, ProofRecord, SimulatedStyle, Telemetry, encode};
use tracing::debug;

use crate::narrative::NarrativeSink;

/// Final narrative line of a simulated run.
pub const COMPLETION_MESSAGE: &str = "Proof successfully generated and verified! (SIMULATION)";

/// How the simulation paces its steps.
///
/// Defaults to [`Instant`](SimulationPacing::Instant): nothing waits on a
/// request's narrative unless a presenter streams it to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationPacing {
    /// Wait each step's advisory delay.
    Realtime,
    /// Emit all steps back to back.
    #[default]
    Instant,
}

impl FromStr for SimulationPacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realtime" | "real-time" => Ok(SimulationPacing::Realtime),
            "instant" | "none" | "off" => Ok(SimulationPacing::Instant),
            other => Err(format!("unknown simulation pacing `{}`", other)),
        }
    }
}

impl fmt::Display for SimulationPacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SimulationPacing::Realtime => "realtime",
            SimulationPacing::Instant => "instant",
        };
        write!(f, "{}", label)
    }
}

/// One line of the simulated narrative and the pause that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationStep {
    pub message: String,
    pub delay: Duration,
}

impl SimulationStep {
    fn new(message: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            message: message.into(),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Produces simulated proof records with a staged narrative.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationEngine {
    pacing: SimulationPacing,
}

impl SimulationEngine {
    pub fn new(pacing: SimulationPacing) -> Self {
        Self { pacing }
    }

    pub fn pacing(&self) -> SimulationPacing {
        self.pacing
    }

    /// The fixed step sequence for a game.
    pub fn steps(telemetry: &Telemetry) -> Vec<SimulationStep> {
        let local = telemetry.score();
        vec![
            SimulationStep::new("Loading SP1 RISC-V program...", 500),
            SimulationStep::new("Preparing game data for verification...", 500),
            SimulationStep::new(
                format!(
                    "Input values: Moves={}, Time={}s, Matched={}",
                    telemetry.moves(),
                    telemetry.elapsed_seconds(),
                    telemetry.matched_pairs()
                ),
                1000,
            ),
            SimulationStep::new("Validating game rules...", 800),
            SimulationStep::new(
                format!(
                    "Checking score calculation: Remaining Time ({}) - Moves ({}) = {}",
                    local.remaining_time,
                    telemetry.moves(),
                    local.score
                ),
                1200,
            ),
            SimulationStep::new("Building SP1 ZK circuit...", 1000),
            SimulationStep::new("Generating cryptographic proof (1/3)...", 1200),
            SimulationStep::new("Generating cryptographic proof (2/3)...", 1200),
            SimulationStep::new("Generating cryptographic proof (3/3)...", 1200),
            SimulationStep::new("Verifying proof...", 1000),
            SimulationStep::new(COMPLETION_MESSAGE, 800),
        ]
    }

    /// Plays the narrative and returns a simulated record.
    ///
    /// The record always has `is_real = false`; `style` selects the hash
    /// layout.
    pub async fn simulate(
        &self,
        telemetry: &Telemetry,
        style: SimulatedStyle,
        narrative: &dyn NarrativeSink,
    ) -> Result<ProofRecord, EncodingError> {
        let steps = Self::steps(telemetry);
        debug!(steps = steps.len(), pacing = %self.pacing, "Starting simulated proof");

        for step in steps {
            narrative.log_line(&step.message);
            if self.pacing == SimulationPacing::Realtime {
                tokio::time::sleep(step.delay).await;
            }
        }

        let record = encode(
            telemetry.score(),
            &ProofOutcome::Unverified,
            telemetry,
            style,
        )?;

        narrative.log_line("=== PROOF RESULT ===");
        narrative.log_line(&format!("Hash: {}", record.hash()));
        narrative.log_line("===================");
        narrative.show_result(&record);

        Ok(record)
    }
}
