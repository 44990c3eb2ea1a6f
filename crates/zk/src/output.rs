//! Prover report classification.
//!
//! The prover's stdout is only inspected once the process has exited and
//! both streams have been captured in full.

use memory_core::{MAX_HASH_FIELD, ProofOutcome};
use thiserror::Error;

/// Literal printed by the prover after a successful local verification.
pub const VERIFICATION_MARKER: &str = "Proof verified successfully";

/// Prefix of the line carrying the score committed by the guest program.
pub const FINAL_SCORE_MARKER: &str = "FINAL_SCORE=";

/// A `FINAL_SCORE` value that cannot be carried by a proof record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("prover reported final score {value} above {max}", max = MAX_HASH_FIELD)]
pub struct FinalScoreError {
    /// Digits exactly as printed by the prover.
    pub value: String,
}

/// Captured result of one prover run.
#[derive(Debug, Clone, Copy)]
pub struct ProverOutput<'a> {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl ProverOutput<'_> {
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Classifies the run.
    ///
    /// - exit 0 with the verification marker: `Verified`, carrying
    ///   `FINAL_SCORE` when present
    /// - exit 0 with the marker but an out-of-range `FINAL_SCORE`: `Failed`
    /// - exit 0 without the marker: `Unverified`
    /// - anything else: `Failed`, with stderr in the reason
    pub fn classify(&self) -> ProofOutcome {
        if !self.success() {
            let status = match self.exit_code {
                Some(code) => format!("prover exited with status {}", code),
                None => "prover terminated by signal".to_string(),
            };
            let stderr = self.stderr.trim();
            return if stderr.is_empty() {
                ProofOutcome::failed(status)
            } else {
                ProofOutcome::failed(format!("{}: {}", status, stderr))
            };
        }

        if !self.stdout.contains(VERIFICATION_MARKER) {
            return ProofOutcome::Unverified;
        }

        match parse_final_score(self.stdout) {
            Ok(score) => ProofOutcome::Verified { score },
            Err(e) => ProofOutcome::failed(e.to_string()),
        }
    }
}

/// Extracts the first `FINAL_SCORE=<digits>` value from prover output.
///
/// Markers not followed by digits are skipped. A value above
/// [`MAX_HASH_FIELD`] is an error rather than being ignored.
pub fn parse_final_score(stdout: &str) -> Result<Option<u32>, FinalScoreError> {
    let digits = stdout.match_indices(FINAL_SCORE_MARKER).find_map(|(index, _)| {
        let rest = &stdout[index + FINAL_SCORE_MARKER.len()..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        (digits_end > 0).then(|| &rest[..digits_end])
    });

    let Some(digits) = digits else {
        return Ok(None);
    };
    digits
        .parse::<u32>()
        .ok()
        .filter(|score| *score <= MAX_HASH_FIELD)
        .map(Some)
        .ok_or_else(|| FinalScoreError {
            value: digits.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERIFIED_REPORT: &str = "\
Memory Game SP1 Proof Generator
TIME_LIMIT=120, REMAINING_TIME=40
FINAL_SCORE=42

Verifying proof...
Proof verified successfully!
";

    fn output<'a>(exit_code: Option<i32>, stdout: &'a str, stderr: &'a str) -> ProverOutput<'a> {
        ProverOutput {
            exit_code,
            stdout,
            stderr,
        }
    }

    #[test]
    fn marker_and_final_score_yield_verified_override() {
        let outcome = output(Some(0), VERIFIED_REPORT, "").classify();
        assert_eq!(outcome, ProofOutcome::Verified { score: Some(42) });
    }

    #[test]
    fn marker_without_final_score_is_verified_without_override() {
        let outcome = output(Some(0), "Proof verified successfully!\n", "").classify();
        assert_eq!(outcome, ProofOutcome::Verified { score: None });
    }

    #[test]
    fn clean_exit_without_marker_is_unverified() {
        let outcome = output(Some(0), "FINAL_SCORE=42\nProof generated\n", "").classify();
        assert_eq!(outcome, ProofOutcome::Unverified);
    }

    #[test]
    fn non_zero_exit_fails_even_with_marker() {
        let outcome = output(Some(1), VERIFIED_REPORT, "panicked at prove\n").classify();
        assert_eq!(
            outcome,
            ProofOutcome::failed("prover exited with status 1: panicked at prove")
        );
    }

    #[test]
    fn signal_termination_without_stderr() {
        let outcome = output(None, "", "   ").classify();
        assert_eq!(outcome, ProofOutcome::failed("prover terminated by signal"));
    }

    #[test]
    fn final_score_parsing_skips_markers_without_digits() {
        assert_eq!(parse_final_score("FINAL_SCORE=\nFINAL_SCORE=17"), Ok(Some(17)));
        assert_eq!(parse_final_score("FINAL_SCORE=7abc"), Ok(Some(7)));
        assert_eq!(parse_final_score("no score here"), Ok(None));
        assert_eq!(parse_final_score("FINAL_SCORE=-3"), Ok(None));
        assert_eq!(parse_final_score("FINAL_SCORE=65535"), Ok(Some(0xFFFF)));
    }

    #[test]
    fn final_score_wider_than_hash_field_is_rejected() {
        assert_eq!(
            parse_final_score("FINAL_SCORE=70000"),
            Err(FinalScoreError {
                value: "70000".to_string()
            })
        );
        assert_eq!(
            parse_final_score("FINAL_SCORE=4294967296"),
            Err(FinalScoreError {
                value: "4294967296".to_string()
            })
        );
    }

    #[test]
    fn verified_run_with_oversized_score_fails() {
        for score in ["70000", "4294967296"] {
            let stdout = format!("FINAL_SCORE={score}\nProof verified successfully!\n");
            let outcome = output(Some(0), &stdout, "").classify();
            assert_eq!(
                outcome,
                ProofOutcome::failed(format!("prover reported final score {score} above 65535"))
            );
        }
    }
}
