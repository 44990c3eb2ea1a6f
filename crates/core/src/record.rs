//! Proof record encoding.
//!
//! [`encode`] is the only place a [`ProofRecord`] is constructed. It is total
//! over every [`ProofOutcome`] variant; the single failure mode is a field
//! that cannot be written into the fixed-width hash.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::EncodingError;
use crate::hash::{HashFields, HashStyle, ParsedHash, Provenance, SimulatedStyle};
use crate::outcome::ProofOutcome;
use crate::score::ScoreResult;
use crate::telemetry::Telemetry;

/// Final artifact returned for one proving request.
///
/// Fields are private so a record cannot be altered after encoding. Records
/// serialize for responses but cannot be deserialized back:
///
/// ```compile_fail
/// let record: memory_core::ProofRecord = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ProofRecord {
    hash: String,
    score: u32,
    moves: u32,
    elapsed_seconds: u32,
    matched_pairs: u32,
    is_real: bool,
    remaining_time: u32,
    created_at: DateTime<Utc>,
}

impl ProofRecord {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn moves(&self) -> u32 {
        self.moves
    }

    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub const fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub const fn is_real(&self) -> bool {
        self.is_real
    }

    pub const fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn provenance(&self) -> Provenance {
        if self.is_real {
            Provenance::Real
        } else {
            Provenance::Simulated
        }
    }

    /// Fields that should be spelled out in the hash.
    pub const fn hash_fields(&self) -> HashFields {
        HashFields {
            score: self.score,
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    /// Re-derives the hash fields from the record and checks them against the
    /// hash it carries, including its provenance.
    pub fn is_consistent(&self) -> bool {
        ParsedHash::parse(&self.hash)
            .map(|parsed| {
                parsed.fields == self.hash_fields() && parsed.provenance() == self.provenance()
            })
            .unwrap_or(false)
    }
}

/// Encodes a proving outcome into a record.
///
/// `Verified` outcomes always produce a real hash and may override the
/// score. Every other outcome produces a simulated hash in `simulated` style
/// and keeps the locally computed score.
pub fn encode(
    local: ScoreResult,
    outcome: &ProofOutcome,
    telemetry: &Telemetry,
    simulated: SimulatedStyle,
) -> Result<ProofRecord, EncodingError> {
    encode_with(
        local,
        outcome,
        telemetry,
        simulated,
        Utc::now(),
        &mut rand::thread_rng(),
    )
}

/// [`encode`] with an explicit timestamp and randomness source.
pub fn encode_with<R: Rng + ?Sized>(
    local: ScoreResult,
    outcome: &ProofOutcome,
    telemetry: &Telemetry,
    simulated: SimulatedStyle,
    created_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<ProofRecord, EncodingError> {
    let (style, score) = match outcome {
        ProofOutcome::Verified { score } => (HashStyle::Real, score.unwrap_or(local.score)),
        ProofOutcome::Unverified | ProofOutcome::Failed { .. } => {
            (HashStyle::Simulated(simulated), local.score)
        }
    };

    let fields = HashFields {
        score,
        moves: telemetry.moves(),
        elapsed_seconds: telemetry.elapsed_seconds(),
    };
    let hash = fields.format(style, rng)?;

    Ok(ProofRecord {
        hash,
        score,
        moves: telemetry.moves(),
        elapsed_seconds: telemetry.elapsed_seconds(),
        matched_pairs: telemetry.matched_pairs(),
        is_real: style.provenance().is_real(),
        remaining_time: local.remaining_time,
        created_at,
    })
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn telemetry() -> Telemetry {
        Telemetry::new(10, 80, 8).unwrap()
    }

    fn encode_seeded(outcome: &ProofOutcome, style: SimulatedStyle) -> ProofRecord {
        let telemetry = telemetry();
        encode_with(
            telemetry.score(),
            outcome,
            &telemetry,
            style,
            Utc::now(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap()
    }

    #[test]
    fn verified_outcome_is_real_and_overrides_score() {
        let record = encode_seeded(
            &ProofOutcome::Verified { score: Some(42) },
            SimulatedStyle::Tagged,
        );

        assert!(record.is_real());
        assert_eq!(record.score(), 42);
        assert_eq!(record.remaining_time(), 40);
        assert_eq!(record.hash(), "0xSP1_002a_000a_0050_REAL");
        assert!(record.is_consistent());
    }

    #[test]
    fn verified_without_final_score_keeps_local_score() {
        let record = encode_seeded(
            &ProofOutcome::Verified { score: None },
            SimulatedStyle::Tagged,
        );
        assert!(record.is_real());
        assert_eq!(record.score(), 30);
    }

    #[test]
    fn failed_and_unverified_outcomes_are_simulated() {
        for outcome in [ProofOutcome::Unverified, ProofOutcome::failed("exit status 1")] {
            let record = encode_seeded(&outcome, SimulatedStyle::Tagged);
            assert!(!record.is_real(), "{outcome}");
            assert_eq!(record.score(), 30);
            assert!(record.hash().starts_with("0xSIM_001e_000a_0050_"));
            assert!(record.is_consistent());
        }
    }

    #[test]
    fn compact_style_applies_only_to_simulated_records() {
        let record = encode_seeded(&ProofOutcome::timeout(), SimulatedStyle::Compact);
        assert!(record.hash().starts_with("0x001e000a0050"));
        assert!(record.is_consistent());

        let record = encode_seeded(
            &ProofOutcome::Verified { score: None },
            SimulatedStyle::Compact,
        );
        assert!(record.hash().starts_with("0xSP1_"));
    }

    #[test]
    fn oversized_prover_score_is_an_encoding_error() {
        let telemetry = telemetry();
        let err = encode(
            telemetry.score(),
            &ProofOutcome::Verified {
                score: Some(70_000),
            },
            &telemetry,
            SimulatedStyle::Tagged,
        )
        .unwrap_err();
        assert!(matches!(err, EncodingError::FieldOverflow { field: "score", .. }));
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = encode_seeded(&ProofOutcome::Unverified, SimulatedStyle::Tagged);
        let value = serde_json::to_value(&record).unwrap();
        for key in [
            "hash",
            "score",
            "moves",
            "elapsedSeconds",
            "matchedPairs",
            "isReal",
            "remainingTime",
            "createdAt",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
