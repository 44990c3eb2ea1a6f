//! Bridge configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use memory_zk::ProverCommand;

use crate::error::ConfigError;
use crate::simulation::SimulationPacing;

/// Settings for [`Bridge`](crate::Bridge).
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// External prover command; `None` disables the real proving path.
    pub prover: Option<ProverCommand>,
    /// Upper bound for queueing plus one prover invocation.
    pub prover_timeout: Duration,
    pub max_concurrent_provers: usize,
    pub pacing: SimulationPacing,
}

impl BridgeConfig {
    pub const DEFAULT_PROVER_TIMEOUT: Duration = Duration::from_secs(900);
    pub const DEFAULT_MAX_CONCURRENT_PROVERS: usize = 2;
    pub const DEFAULT_PROJECT_ROOT: &'static str = "memory_proof/script";

    /// Configuration without an external prover.
    pub fn simulation_only() -> Self {
        Self {
            prover: None,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PROVER_ENABLED` - Use the external prover (default: true)
    /// - `PROVER_PROGRAM` - Prover executable (default: cargo)
    /// - `PROVER_ARGS` - Whitespace-separated leading arguments
    ///   (default: `run --bin memory_prove --release --`)
    /// - `PROVER_PROJECT_ROOT` - Working directory of the prover (default: memory_proof/script)
    /// - `PROVER_TIMEOUT_SECS` - Per-request prover timeout (default: 900)
    /// - `MAX_CONCURRENT_PROVERS` - Concurrent prover processes (default: 2)
    /// - `SIMULATION_PACING` - `realtime` or `instant` (default: instant)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if read_bool(&lookup, "PROVER_ENABLED")? == Some(false) {
            config.prover = None;
        }

        if let Some(mut command) = config.prover.take() {
            if let Some(program) = lookup("PROVER_PROGRAM") {
                let program = program.trim();
                if program.is_empty() {
                    return Err(ConfigError::Empty("PROVER_PROGRAM"));
                }
                command = ProverCommand::new(program)
                    .args(command.leading_args().iter().cloned())
                    .project_root(command.root());
            }
            if let Some(args) = lookup("PROVER_ARGS") {
                command = ProverCommand::new(command.program())
                    .args(args.split_whitespace())
                    .project_root(command.root());
            }
            if let Some(root) = lookup("PROVER_PROJECT_ROOT") {
                let root = root.trim();
                if root.is_empty() {
                    return Err(ConfigError::Empty("PROVER_PROJECT_ROOT"));
                }
                command = command.project_root(PathBuf::from(root));
            }
            config.prover = Some(command);
        }

        if let Some(secs) = read_parsed::<u64, _>(&lookup, "PROVER_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "PROVER_TIMEOUT_SECS",
                    value: secs.to_string(),
                });
            }
            config.prover_timeout = Duration::from_secs(secs);
        }

        if let Some(limit) = read_parsed::<usize, _>(&lookup, "MAX_CONCURRENT_PROVERS")? {
            config.max_concurrent_provers = limit.max(1);
        }

        if let Some(pacing) = read_parsed::<SimulationPacing, _>(&lookup, "SIMULATION_PACING")? {
            config.pacing = pacing;
        }

        Ok(config)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            prover: Some(ProverCommand::sp1_script(Self::DEFAULT_PROJECT_ROOT)),
            prover_timeout: Self::DEFAULT_PROVER_TIMEOUT,
            max_concurrent_provers: Self::DEFAULT_MAX_CONCURRENT_PROVERS,
            pacing: SimulationPacing::default(),
        }
    }
}

fn read_parsed<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

fn read_bool<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}
