//! Child-process prover.
//!
//! Spawns the configured prover program with the game counters as positional
//! arguments, waits for it to exit, and classifies the captured output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use memory_core::{ProofOutcome, Telemetry};

use crate::output::ProverOutput;
use crate::prover::ProverInvoker;

/// How to launch the external prover.
///
/// The final command line is `program args... <moves> <time> <matched_pairs>`
/// executed with `project_root` as working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverCommand {
    program: PathBuf,
    args: Vec<String>,
    project_root: PathBuf,
}

impl ProverCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            project_root: PathBuf::from("."),
        }
    }

    /// The SP1 host script, built and run through cargo.
    pub fn sp1_script(project_root: impl Into<PathBuf>) -> Self {
        Self::new("cargo")
            .args(["run", "--bin", "memory_prove", "--release", "--"])
            .project_root(project_root)
    }

    /// Appends a leading argument placed before the game counters.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = project_root.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn leading_args(&self) -> &[String] {
        &self.args
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }

    fn build(&self, telemetry: &Telemetry) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(telemetry.moves().to_string())
            .arg(telemetry.elapsed_seconds().to_string())
            .arg(telemetry.matched_pairs().to_string())
            .current_dir(&self.project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

/// Prover that runs [`ProverCommand`] as a child process per request.
///
/// The child is killed if the invocation future is dropped, which is how
/// request timeouts and client disconnects reach the process.
#[derive(Debug, Clone)]
pub struct ProcessProver {
    command: ProverCommand,
}

impl ProcessProver {
    pub fn new(command: ProverCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ProverCommand {
        &self.command
    }
}

#[async_trait]
impl ProverInvoker for ProcessProver {
    async fn invoke(&self, telemetry: &Telemetry) -> ProofOutcome {
        let local = telemetry.score();
        info!(
            moves = telemetry.moves(),
            time = telemetry.elapsed_seconds(),
            matched_pairs = telemetry.matched_pairs(),
            local_score = local.score,
            program = %self.command.program.display(),
            "Running external prover"
        );

        let started = Instant::now();
        let output = match self.command.build(telemetry).output().await {
            Ok(output) => output,
            Err(e) => {
                warn!(
                    "Failed to spawn prover {}: {}",
                    self.command.program.display(),
                    e
                );
                return ProofOutcome::failed(format!(
                    "failed to spawn prover `{}`: {}",
                    self.command.program.display(),
                    e
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            "Prover exited"
        );
        if !stderr.trim().is_empty() {
            debug!("Prover stderr: {}", stderr.trim());
        }

        let outcome = ProverOutput {
            exit_code: output.status.code(),
            stdout: &stdout,
            stderr: &stderr,
        }
        .classify();

        match &outcome {
            ProofOutcome::Verified { score: Some(score) } if *score != local.score => {
                info!(
                    "Prover verified score {} (local score {})",
                    score, local.score
                );
            }
            ProofOutcome::Verified { .. } => info!("Prover verified score {}", local.score),
            ProofOutcome::Unverified => warn!("Prover finished without verification marker"),
            ProofOutcome::Failed { reason } => warn!("Prover failed: {}", reason),
        }

        outcome
    }

    fn name(&self) -> &str {
        "process"
    }
}
