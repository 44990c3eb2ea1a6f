//! Proof orchestration for memory game scores.
//!
//! This crate wires the prover invoker, the simulation engine and the record
//! encoder into a single [`Bridge`] that always answers with a
//! [`ProofRecord`]: real when the external prover verified the game,
//! simulated otherwise.
//!
//! Modules are organized by responsibility:
//! - [`bridge`] hosts the orchestrator and its builder
//! - [`simulation`] replays the proving narrative without cryptography
//! - [`narrative`] is the seam to whatever presents progress to the player
//! - [`metrics`] tracks outcomes and prover concurrency
//! - [`config`] loads bridge settings from the environment
pub mod bridge;
pub mod config;
pub mod error;
pub mod metrics;
pub mod narrative;
pub mod simulation;

pub use bridge::{Bridge, BridgeBuilder, Stage};
pub use config::BridgeConfig;
pub use error::{BridgeError, ConfigError, Result};
pub use metrics::{BridgeMetrics, MetricsSnapshot};
pub use narrative::{ChannelNarrative, NarrativeEvent, NarrativeSink, TracingNarrative};
pub use simulation::{SimulationEngine, SimulationPacing, SimulationStep};

pub use memory_core::{ProofOutcome, ProofRecord, Telemetry};
