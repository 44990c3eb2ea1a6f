//! Wire types of the HTTP API.

use chrono::{DateTime, SecondsFormat, Utc};
use memory_core::ProofRecord;
use proof_bridge::MetricsSnapshot;
use serde::Serialize;

pub const ALGORITHM: &str = "SP1 ZK-STARK";
pub const SCORE_FORMULA: &str = "Remaining Time - Moves";
pub const REAL_VERIFICATION: &str = "Real SP1 RISC-V zkVM";
pub const SIMULATED_VERIFICATION: &str = "Simulation";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    pub success: bool,
    pub proof_hash: String,
    pub calculated_score: u32,
    pub is_real_proof: bool,
    pub game_data: GameData,
    pub remaining_time: u32,
    pub proof_details: ProofDetails,
}

/// Echo of the validated request counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub moves: u32,
    pub time: u32,
    pub matched_pairs: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofDetails {
    pub algorithm: &'static str,
    pub verification_method: &'static str,
    pub score_formula: &'static str,
    pub created_at: String,
}

impl From<&ProofRecord> for ProofResponse {
    fn from(record: &ProofRecord) -> Self {
        Self {
            success: true,
            proof_hash: record.hash().to_string(),
            calculated_score: record.score(),
            is_real_proof: record.is_real(),
            game_data: GameData {
                moves: record.moves(),
                time: record.elapsed_seconds(),
                matched_pairs: record.matched_pairs(),
            },
            remaining_time: record.remaining_time(),
            proof_details: ProofDetails {
                algorithm: ALGORITHM,
                verification_method: if record.is_real() {
                    REAL_VERIFICATION
                } else {
                    SIMULATED_VERIFICATION
                },
                score_formula: SCORE_FORMULA,
                created_at: iso_timestamp(record.created_at()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub metrics: MetricsSnapshot,
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_use_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2024-03-01T12:30:05.000Z");
    }
}
